//=====================================================================
// Material: an atom-density-weighted mixture of isotopes. Built once
// at setup from a composition spec; immutable afterward and shared
// (via `Arc`) across every worker thread and every cell that
// references it.
//=====================================================================
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::Isotope;
use crate::config::MaterialSpec;
use crate::error::{Result, TransportError};
use crate::random::Random;

// `weight` is atom-fraction already pre-multiplied by the material's
// atomic density, so `weight_i * isotope_i.total_xs(E)` sums directly
// to the macroscopic total cross section.
#[derive(Clone)]
pub struct MaterialComponent {
    pub isotope: Arc<Isotope>,
    pub weight: f64,
}

#[derive(Clone)]
pub struct Material {
    pub name: String,
    pub components: Vec<MaterialComponent>,
}

impl Material {
    // `fractions` are atom-fractions (need not sum to 1; the composition
    // carries its own internal normalization via `atomic_density`).
    // Stored sorted by isotope name so iteration order - and therefore
    // any rounding accumulated while summing cross sections - is
    // reproducible across runs regardless of input order.
    pub fn new(name: impl Into<String>, atomic_density: f64, fractions: Vec<(Arc<Isotope>, f64)>) -> Self {
        let mut components: Vec<MaterialComponent> = fractions
            .into_iter()
            .map(|(isotope, fraction)| MaterialComponent { weight: fraction * atomic_density, isotope })
            .collect();
        components.sort_by(|a, b| a.isotope.name.cmp(&b.isotope.name));
        Self { name: name.into(), components }
    }

    // Resolve a composition spec's isotope zaids against an already-loaded
    // isotope table (keyed by zaid, as read from the ACE library).
    pub fn from_spec(spec: &MaterialSpec, isotopes: &HashMap<String, Arc<Isotope>>) -> anyhow::Result<Self> {
        let mut fractions = Vec::with_capacity(spec.isotopes.len());
        for (zaid, fraction) in &spec.isotopes {
            let isotope = isotopes
                .get(zaid)
                .ok_or_else(|| TransportError::lookup(zaid.clone(), spec.id.clone()))?;
            fractions.push((Arc::clone(isotope), *fraction));
        }
        Ok(Self::new(spec.id.clone(), spec.atomic_density, fractions))
    }

    pub fn macroscopic_total_xs(&self, energy: f64) -> Result<f64> {
        let mut total = 0.0;
        for component in &self.components {
            total += component.weight * component.isotope.total_xs(energy)?;
        }
        TransportError::check_finite(total, "macroscopic total cross section")
    }

    // Mean free path in the material's length unit (cm, given ACE's
    // barns/atom convention and an atomic density in atoms/b-cm).
    pub fn mean_free_path(&self, energy: f64) -> Result<f64> {
        let total = self.macroscopic_total_xs(energy)?;
        if total <= 0.0 {
            return Err(TransportError::domain(format!("material '{}' has zero total cross section at E={energy}", self.name)));
        }
        Ok(1.0 / total)
    }

    // Sample an isotope proportional to `weight_i * sigma_total,i(E)`.
    pub fn sample_isotope(&self, energy: f64, rng: &mut Random) -> Result<&Isotope> {
        let mut contributions = Vec::with_capacity(self.components.len());
        let mut total = 0.0;
        for component in &self.components {
            let contribution = component.weight * component.isotope.total_xs(energy)?;
            total += contribution;
            contributions.push(contribution);
        }
        if total <= 0.0 {
            return Err(TransportError::domain(format!("material '{}' has no isotopes active at E={energy}", self.name)));
        }

        let target = rng.uniform() * total;
        let mut cumulative = 0.0;
        for (component, contribution) in self.components.iter().zip(contributions.iter()) {
            cumulative += contribution;
            if target <= cumulative {
                return Ok(&component.isotope);
            }
        }
        Ok(&self.components.last().expect("material with no components cannot be sampled").isotope)
    }

    // Fold every component isotope's energy grid into the shared
    // MasterGrid accumulator. Call once per material during setup,
    // before `MasterGrid::setup()`.
    pub fn register_grids(&self, master: &mut crate::grids::MasterGrid) {
        for component in &self.components {
            master.register(&component.isotope.child_grid.energies);
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Material({}, {} isotopes)", self.name, self.components.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_isotope;

    #[tokio::test]
    async fn test_mean_free_path_is_inverse_of_total_xs() {
        let isotope = Arc::new(get_isotope().await);
        let expected_total_xs = isotope.total_xs(2.0).unwrap();
        let material = Material::new("test", 1.0, vec![(isotope, 1.0)]);
        let mfp = material.mean_free_path(2.0).unwrap();
        assert!((mfp - 1.0 / expected_total_xs).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_sample_isotope_single_component_always_returns_it() {
        let isotope = Arc::new(get_isotope().await);
        let name = isotope.name.clone();
        let material = Material::new("test", 1.0, vec![(isotope, 1.0)]);
        let mut rng = Random::seed(7);
        let sampled = material.sample_isotope(2.0, &mut rng).unwrap();
        assert_eq!(sampled.name, name);
    }
}
