//=====================================================================
// Construction of a `Geometry` from the flat object lists the input
// document supplies. This is the one part of the geometry module that
// deals with user-facing names instead of arena indices; everything
// downstream (the transport hot path) only ever sees internal ids.
//=====================================================================
use std::collections::{HashMap, HashSet};

use crate::config::{CellSpec, GeometrySpec, LatticePlane, LatticeSpec, SurfaceFlagSpec, SurfaceKindSpec, SurfaceSpec};
use crate::error::{Result, TransportError};
use crate::geometry::{expand_lattice, Cell, Geometry, LatticeOrientation, Surface, SurfaceFlag, SurfaceKind, Transformation, Universe, Vec3};

#[derive(Debug, Default, Clone)]
pub struct GeometryIndex {
    pub cell_path: HashMap<usize, String>,
    pub cell_reverse: HashMap<String, usize>,
    pub cell_buckets: HashMap<String, Vec<usize>>,
    pub surface_path: HashMap<usize, String>,
    pub surface_reverse: HashMap<String, usize>,
    pub surface_buckets: HashMap<String, Vec<usize>>,
    pub universe_buckets: HashMap<String, Vec<usize>>,
    // internal cell id -> material user id, resolved by `setup_materials`.
    pub cell_material_names: HashMap<usize, String>,
}

impl GeometryIndex {
    // A full path resolves to exactly one clone; a bare local id
    // resolves to every clone of it.
    pub fn resolve_cells(&self, user_id: &str) -> Vec<usize> {
        if let Some(&internal) = self.cell_reverse.get(user_id) {
            return vec![internal];
        }
        self.cell_buckets.get(user_id).cloned().unwrap_or_default()
    }

    pub fn resolve_surfaces(&self, user_id: &str) -> Vec<usize> {
        if let Some(&internal) = self.surface_reverse.get(user_id) {
            return vec![internal];
        }
        self.surface_buckets.get(user_id).cloned().unwrap_or_default()
    }
}

fn kind_from_spec(spec: &SurfaceKindSpec) -> SurfaceKind {
    match *spec {
        SurfaceKindSpec::PlaneX { x } => SurfaceKind::PlaneX { x },
        SurfaceKindSpec::PlaneY { y } => SurfaceKind::PlaneY { y },
        SurfaceKindSpec::PlaneZ { z } => SurfaceKind::PlaneZ { z },
        SurfaceKindSpec::CylinderX { y, z, r } => SurfaceKind::CylinderX { y, z, r },
        SurfaceKindSpec::CylinderY { x, z, r } => SurfaceKind::CylinderY { x, z, r },
        SurfaceKindSpec::CylinderZ { x, y, r } => SurfaceKind::CylinderZ { x, y, r },
        SurfaceKindSpec::Sphere { x, y, z, r } => SurfaceKind::Sphere { x, y, z, r },
    }
}

fn flag_from_spec(spec: SurfaceFlagSpec) -> SurfaceFlag {
    match spec {
        SurfaceFlagSpec::None => SurfaceFlag::None,
        SurfaceFlagSpec::Reflecting => SurfaceFlag::Reflecting,
        SurfaceFlagSpec::Vacuum => SurfaceFlag::Vacuum,
    }
}

fn orientation_from_plane(plane: LatticePlane) -> LatticeOrientation {
    match plane {
        LatticePlane::XY => LatticeOrientation::Xy,
        LatticePlane::YZ => LatticeOrientation::Yz,
        LatticePlane::XZ => LatticeOrientation::Xz,
    }
}

// A surface, resolved to its un-transformed kind and flag, keyed by
// the user-facing id it's referenced by.
struct SurfaceTemplate {
    kind: SurfaceKind,
    flag: SurfaceFlag,
}

// A cell definition, independent of whether it came from the input
// document directly or was generated by expanding a lattice.
struct CellTemplate {
    id: String,
    universe: String,
    surfaces: Vec<(String, bool)>,
    negated: bool,
    dead: bool,
    material: Option<String>,
    fill: Option<String>,
    transformation: Transformation,
}

impl CellTemplate {
    fn from_spec(spec: &CellSpec) -> Self {
        let surfaces = spec.surfaces.iter().map(|s| (s.surface_id().to_string(), s.sense())).collect();
        let translation = Vec3::new(
            spec.transformation.translation[0],
            spec.transformation.translation[1],
            spec.transformation.translation[2],
        );
        let rotation = Vec3::new(
            spec.transformation.rotation_degrees[0],
            spec.transformation.rotation_degrees[1],
            spec.transformation.rotation_degrees[2],
        );
        Self {
            id: spec.id.clone(),
            universe: spec.universe.clone(),
            surfaces,
            negated: spec.negated,
            dead: spec.dead,
            material: spec.material.clone(),
            fill: spec.fill.clone(),
            transformation: Transformation::new(translation, rotation),
        }
    }
}

// Expand one lattice into bounding-plane surface templates and one
// cell template per lattice cell, each translated to its cell center
// and filled with the corresponding entry of `fills`.
fn expand_one_lattice(
    lattice: &LatticeSpec,
    surfaces: &mut HashMap<String, SurfaceTemplate>,
    cells: &mut Vec<CellTemplate>,
) -> Result<()> {
    if lattice.fills.len() != lattice.nx * lattice.ny {
        return Err(TransportError::geometry(format!(
            "lattice '{}' declares {} fills but nx*ny = {}",
            lattice.id,
            lattice.fills.len(),
            lattice.nx * lattice.ny
        )));
    }

    let orientation = orientation_from_plane(lattice.plane);
    let expansion = expand_lattice(orientation, lattice.nx, lattice.ny, lattice.dx, lattice.dy);

    let mut local_surface_ids = Vec::with_capacity(expansion.surfaces.len());
    for (i, kind) in expansion.surfaces.into_iter().enumerate() {
        let surface_id = format!("{}_plane{i}", lattice.id);
        surfaces.insert(surface_id.clone(), SurfaceTemplate { kind, flag: SurfaceFlag::None });
        local_surface_ids.push(surface_id);
    }

    for (i, (cell_surfaces, center)) in expansion.cell_surfaces.into_iter().zip(expansion.cell_centers).enumerate() {
        let surfaces = cell_surfaces.into_iter().map(|(local, sense)| (local_surface_ids[local].clone(), sense)).collect();
        cells.push(CellTemplate {
            id: format!("{}_cell{i}", lattice.id),
            universe: lattice.universe.clone(),
            surfaces,
            negated: false,
            dead: false,
            material: None,
            fill: Some(lattice.fills[i].clone()),
            transformation: Transformation::new(center, Vec3::default()),
        });
    }

    Ok(())
}

struct Builder {
    surface_templates: HashMap<String, SurfaceTemplate>,
    cells_by_universe: HashMap<String, Vec<usize>>,
    cell_templates: Vec<CellTemplate>,
    surfaces: Vec<Surface>,
    cells: Vec<Cell>,
    universes: Vec<Universe>,
    index: GeometryIndex,
}

impl Builder {
    fn add_surface(&mut self, template_id: &str, transformation: Transformation, path: Option<&str>) -> Result<usize> {
        let template = self
            .surface_templates
            .get(template_id)
            .ok_or_else(|| TransportError::geometry(format!("surface '{template_id}' is not defined")))?;
        let kind = template.kind.transformed(&transformation);
        let flag = template.flag;

        if let Some(existing) = self.surfaces.iter().find(|s| s.flag == flag && s.kind.almost_equal(&kind)) {
            return Ok(existing.internal_id);
        }

        let internal_id = self.surfaces.len();
        let user_id = match path {
            Some(path) => format!("{template_id}<{path}"),
            None => template_id.to_string(),
        };
        self.surfaces.push(Surface::new(internal_id, user_id.clone(), kind, flag));
        self.index.surface_path.insert(internal_id, user_id.clone());
        self.index.surface_reverse.insert(user_id, internal_id);
        self.index.surface_buckets.entry(template_id.to_string()).or_default().push(internal_id);
        Ok(internal_id)
    }

    fn build_universe(&mut self, universe_id: &str, parent_context: Transformation, parent_path: Option<&str>) -> Result<usize> {
        let internal_universe_id = self.universes.len();
        let universe_user_id = match parent_path {
            Some(path) => format!("{universe_id}<{path}"),
            None => universe_id.to_string(),
        };
        self.universes.push(Universe::new(internal_universe_id, universe_user_id, None));
        self.index.universe_buckets.entry(universe_id.to_string()).or_default().push(internal_universe_id);

        let cell_indices = self.cells_by_universe.get(universe_id).cloned().unwrap_or_default();
        for cell_index in cell_indices {
            // Clone the template fields we need out from under `self` so the
            // recursive call below can still borrow `self` mutably.
            let id = self.cell_templates[cell_index].id.clone();
            let surfaces = self.cell_templates[cell_index].surfaces.clone();
            let negated = self.cell_templates[cell_index].negated;
            let dead = self.cell_templates[cell_index].dead;
            let material = self.cell_templates[cell_index].material.clone();
            let fill = self.cell_templates[cell_index].fill.clone();
            let cell_transform = self.cell_templates[cell_index].transformation;

            let combined_transform = parent_context.compose(&cell_transform);
            let cell_path = match parent_path {
                Some(path) => format!("{id}<{path}"),
                None => id.clone(),
            };

            let mut surface_refs = Vec::with_capacity(surfaces.len());
            for (surface_id, sense) in &surfaces {
                let internal_surface_id = self.add_surface(surface_id, combined_transform, parent_path)?;
                surface_refs.push((internal_surface_id, *sense));
            }

            let internal_cell_id = self.cells.len();
            let mut cell = Cell::new(internal_cell_id, id.clone(), cell_path.clone(), surface_refs.clone());
            cell.negated = negated;
            cell.dead = dead;
            cell.parent_universe = Some(internal_universe_id);
            self.cells.push(cell);
            self.universes[internal_universe_id].cells.push(internal_cell_id);

            for &(surface_id, sense) in &surface_refs {
                self.surfaces[surface_id].register_neighbor(sense, internal_universe_id);
            }

            self.index.cell_path.insert(internal_cell_id, cell_path.clone());
            self.index.cell_reverse.insert(cell_path.clone(), internal_cell_id);
            self.index.cell_buckets.entry(id.clone()).or_default().push(internal_cell_id);
            if let Some(material_name) = material {
                self.index.cell_material_names.insert(internal_cell_id, material_name);
            }

            if let Some(fill_universe_id) = fill {
                let fill_internal = self.build_universe(&fill_universe_id, combined_transform, Some(&cell_path))?;
                self.cells[internal_cell_id].fill = Some(fill_internal);
                self.universes[fill_internal].parent_cell = Some(internal_cell_id);
            }
        }

        Ok(internal_universe_id)
    }
}

pub fn build_geometry(spec: &GeometrySpec) -> Result<(Geometry, GeometryIndex)> {
    let mut universe_ids: HashSet<&str> = HashSet::new();
    for cell in &spec.cells {
        universe_ids.insert(cell.universe.as_str());
        if let Some(fill) = &cell.fill {
            universe_ids.insert(fill.as_str());
        }
    }
    for lattice in &spec.lattices {
        if universe_ids.contains(lattice.id.as_str()) {
            return Err(TransportError::geometry(format!("lattice id '{}' clashes with a cell universe/fill id", lattice.id)));
        }
    }

    let mut surface_templates: HashMap<String, SurfaceTemplate> = spec
        .surfaces
        .iter()
        .map(|s: &SurfaceSpec| (s.id.clone(), SurfaceTemplate { kind: kind_from_spec(&s.kind), flag: flag_from_spec(s.flag) }))
        .collect();

    let mut cell_templates: Vec<CellTemplate> = spec.cells.iter().map(CellTemplate::from_spec).collect();

    for lattice in &spec.lattices {
        expand_one_lattice(lattice, &mut surface_templates, &mut cell_templates)?;
    }

    let mut cells_by_universe: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, cell) in cell_templates.iter().enumerate() {
        cells_by_universe.entry(cell.universe.clone()).or_default().push(index);
    }

    let mut builder = Builder {
        surface_templates,
        cells_by_universe,
        cell_templates,
        surfaces: Vec::new(),
        cells: Vec::new(),
        universes: Vec::new(),
        index: GeometryIndex::default(),
    };

    let base_universe = builder.build_universe(&spec.base_universe, Transformation::default(), None)?;
    let geometry = Geometry::new(builder.surfaces, builder.cells, builder.universes, base_universe);
    Ok((geometry, builder.index))
}

// Resolve each cell's material user id (from the input document)
// against the already-built material table, rejecting any cell left
// with neither a fill nor a material.
pub fn setup_materials(geometry: &mut Geometry, index: &GeometryIndex, material_index: &HashMap<String, usize>) -> Result<()> {
    for cell in geometry.cells.iter_mut() {
        if cell.dead {
            continue;
        }
        match index.cell_material_names.get(&cell.internal_id) {
            Some(name) => {
                let material_id = material_index
                    .get(name)
                    .ok_or_else(|| TransportError::geometry(format!("material '{name}' referenced by cell '{}' not found", cell.user_id)))?;
                cell.material = Some(*material_id);
            }
            None if cell.fill.is_none() => {
                return Err(TransportError::geometry(format!("cell '{}' has neither a material nor a fill", cell.user_id)));
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CellSpec, GeometrySpec, SignedSurfaceRef, SurfaceSpec, TransformationSpec};

    fn sphere_spec(id: &str, r: f64) -> SurfaceSpec {
        SurfaceSpec { id: id.to_string(), kind: SurfaceKindSpec::Sphere { x: 0.0, y: 0.0, z: 0.0, r }, flag: SurfaceFlagSpec::Vacuum }
    }

    fn cell_spec(id: &str, universe: &str, surface: &str, sense: bool) -> CellSpec {
        CellSpec {
            id: id.to_string(),
            universe: universe.to_string(),
            surfaces: vec![SignedSurfaceRef(if sense { surface.to_string() } else { format!("-{surface}") })],
            negated: false,
            dead: false,
            material: Some("fuel".to_string()),
            fill: None,
            transformation: TransformationSpec::default(),
        }
    }

    #[test]
    fn test_single_sphere_builds_one_cell_one_surface() {
        let spec = GeometrySpec {
            surfaces: vec![sphere_spec("1", 10.0)],
            cells: vec![cell_spec("1", "0", "1", false)],
            lattices: vec![],
            base_universe: "0".to_string(),
        };
        let (geometry, index) = build_geometry(&spec).unwrap();
        assert_eq!(geometry.surfaces.len(), 1);
        assert_eq!(geometry.cells.len(), 1);
        assert_eq!(index.resolve_cells("1"), vec![0]);
    }

    #[test]
    fn test_lattice_id_clash_is_rejected() {
        let spec = GeometrySpec {
            surfaces: vec![],
            cells: vec![cell_spec("1", "lattice_a", "1", true)],
            lattices: vec![LatticeSpec {
                id: "lattice_a".to_string(),
                universe: "0".to_string(),
                plane: LatticePlane::XY,
                nx: 1,
                ny: 1,
                dx: 1.0,
                dy: 1.0,
                fills: vec!["inner".to_string()],
            }],
            base_universe: "0".to_string(),
        };
        assert!(build_geometry(&spec).is_err());
    }

    #[test]
    fn test_fill_recurses_into_nested_universe() {
        let spec = GeometrySpec {
            surfaces: vec![sphere_spec("outer", 10.0), sphere_spec("inner", 1.0)],
            cells: vec![
                CellSpec {
                    id: "host".to_string(),
                    universe: "0".to_string(),
                    surfaces: vec![SignedSurfaceRef("-outer".to_string())],
                    negated: false,
                    dead: false,
                    material: None,
                    fill: Some("pin".to_string()),
                    transformation: TransformationSpec::default(),
                },
                cell_spec("fuel_cell", "pin", "inner", false),
            ],
            lattices: vec![],
            base_universe: "0".to_string(),
        };
        let (geometry, index) = build_geometry(&spec).unwrap();
        assert_eq!(geometry.universes.len(), 2);
        let host = geometry.cells[index.resolve_cells("host")[0]].clone();
        assert!(host.fill.is_some());
    }
}
