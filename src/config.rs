//=====================================================================
// Typed object lists handed to the core by whatever parses the actual
// input document (XML in production, JSON in tests via `serde_json`).
// These structs carry no behavior of their own; they exist purely so
// the external parser and the core agree on a schema.
//=====================================================================
use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialSpec {
    pub id: String,
    pub atomic_density: f64,
    // isotope zaid -> atom fraction. Need not sum to 1.
    pub isotopes: HashMap<String, f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFlagSpec {
    None,
    Reflecting,
    Vacuum,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceKindSpec {
    PlaneX { x: f64 },
    PlaneY { y: f64 },
    PlaneZ { z: f64 },
    CylinderX { y: f64, z: f64, r: f64 },
    CylinderY { x: f64, z: f64, r: f64 },
    CylinderZ { x: f64, y: f64, r: f64 },
    Sphere { x: f64, y: f64, z: f64, r: f64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceSpec {
    pub id: String,
    #[serde(flatten)]
    pub kind: SurfaceKindSpec,
    #[serde(default = "default_surface_flag")]
    pub flag: SurfaceFlagSpec,
}

fn default_surface_flag() -> SurfaceFlagSpec {
    SurfaceFlagSpec::None
}

// A signed surface reference: "-3" means surface "3" with negative
// expected sense, "3" means positive sense.
#[derive(Debug, Clone, Deserialize)]
pub struct SignedSurfaceRef(pub String);

impl SignedSurfaceRef {
    pub fn sense(&self) -> bool {
        !self.0.starts_with('-')
    }

    pub fn surface_id(&self) -> &str {
        self.0.strip_prefix('-').unwrap_or(&self.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransformationSpec {
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default)]
    pub rotation_degrees: [f64; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellSpec {
    pub id: String,
    pub universe: String,
    pub surfaces: Vec<SignedSurfaceRef>,
    #[serde(default)]
    pub negated: bool,
    #[serde(default)]
    pub dead: bool,
    pub material: Option<String>,
    pub fill: Option<String>,
    #[serde(default)]
    pub transformation: TransformationSpec,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatticePlane {
    XY,
    YZ,
    XZ,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatticeSpec {
    pub id: String,
    pub universe: String,
    pub plane: LatticePlane,
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
    // fill-universe ids, row-major, length must equal nx * ny.
    pub fills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometrySpec {
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    #[serde(default)]
    pub cells: Vec<CellSpec>,
    #[serde(default)]
    pub lattices: Vec<LatticeSpec>,
    pub base_universe: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionSpec {
    UniformAxis { axis: Axis, min: f64, max: f64 },
    IsotropicDirection,
    Box1D { axis: Axis, min: f64, max: f64 },
    Box2D { axes: (Axis, Axis), min: (f64, f64), max: (f64, f64) },
    Box3D { min: (f64, f64, f64), max: (f64, f64, f64) },
    Custom { children: Vec<WeightedSpec<DistributionSpec>>  },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightedSpec<T> {
    pub weight: f64,
    #[serde(flatten)]
    pub item: T,
}

fn default_starting_energy() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticleSamplerSpec {
    pub reference_position: (f64, f64, f64),
    pub reference_direction: (f64, f64, f64),
    // Starting energy in MeV, before any distribution runs. None of the
    // phase-space distributions touch energy, so this is the particle's
    // energy for the rest of its history unless birth-energy sampling is
    // added later; defaults to the original engine's particle default.
    #[serde(default = "default_starting_energy")]
    pub energy: f64,
    pub distributions: Vec<DistributionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticleSourceSpec {
    pub samplers: Vec<WeightedSpec<ParticleSamplerSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub sources: Vec<WeightedSpec<ParticleSourceSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsSpec {
    pub particles: usize,
    pub inactive: usize,
    pub batches: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSpec {
    pub materials: Vec<MaterialSpec>,
    pub geometry: GeometrySpec,
    pub source: SourceSpec,
    pub settings: SettingsSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_spec_from_json() {
        let json = r#"{"id": "fuel", "atomic_density": 0.045, "isotopes": {"92235.800nc": 0.03, "8016.800nc": 0.97}}"#;
        let spec: MaterialSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.id, "fuel");
        assert_eq!(spec.isotopes.len(), 2);
    }

    #[test]
    fn test_surface_spec_discriminated_by_kind() {
        let json = r#"{"id": "1", "kind": "sphere", "x": 0.0, "y": 0.0, "z": 0.0, "r": 10.0}"#;
        let spec: SurfaceSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec.kind, SurfaceKindSpec::Sphere { r, .. } if r == 10.0));
        assert!(matches!(spec.flag, SurfaceFlagSpec::None));
    }

    #[test]
    fn test_signed_surface_ref_parses_sense() {
        let positive = SignedSurfaceRef("3".to_string());
        let negative = SignedSurfaceRef("-3".to_string());
        assert!(positive.sense());
        assert_eq!(positive.surface_id(), "3");
        assert!(!negative.sense());
        assert_eq!(negative.surface_id(), "3");
    }

    #[test]
    fn test_settings_spec_requires_core_fields() {
        let json = r#"{"particles": 10000, "inactive": 20, "batches": 100, "seed": 42}"#;
        let spec: SettingsSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.particles, 10000);
        assert_eq!(spec.seed, Some(42));
    }
}
