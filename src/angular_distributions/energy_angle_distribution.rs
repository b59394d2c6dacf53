use std::error::Error;

use crate::angular_distributions::{AngularDistribution, IsotropicAngularDistribution, SampleAngle};
use crate::unitf64::UnitF64;

// All of the angular distributions for a reaction, one per tabulated
// incident energy point; sampled by locating the bracketing energies
// and interpolating between the two sampled cosines.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct EnergyDependentAngularDistribution {
    pub energy: Vec<f64>,
    pub distributions: Vec<AngularDistribution>,
}

impl EnergyDependentAngularDistribution {
    pub fn new_fully_isotropic() -> Self {
        Self {
            energy: vec![1.0e-11, 3.0e1],
            distributions: vec![
                AngularDistribution::Isotropic(IsotropicAngularDistribution {}),
                AngularDistribution::Isotropic(IsotropicAngularDistribution {}),
            ],
        }
    }

    pub fn sample_cos_theta_at_energy(&self, energy: f64, unitf64: UnitF64) -> Result<f64, Box<dyn Error>> {
        if energy < self.energy[0] || energy > *self.energy.last().unwrap() {
            return Err(Box::new(EnergyDependentAngularDistributionError(format!(
                "energy {} is out of range [{}, {}]",
                energy,
                self.energy[0],
                self.energy.last().unwrap()
            ))));
        }

        let energy_index = self.energy.iter().position(|&e| e >= energy).unwrap();

        if energy == self.energy[energy_index] {
            self.distributions[energy_index].sample_cos_theta(unitf64)
        } else {
            let lower = energy_index - 1;
            let upper = energy_index;

            let factor = (energy - self.energy[lower]) / (self.energy[upper] - self.energy[lower]);
            let lower_sample = self.distributions[lower].sample_cos_theta(unitf64)?;
            let upper_sample = self.distributions[upper].sample_cos_theta(unitf64)?;

            Ok(lower_sample + (upper_sample - lower_sample) * factor)
        }
    }
}

impl std::fmt::Display for EnergyDependentAngularDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EnergyDependentAngularDistribution({} energies)", self.energy.len())
    }
}

#[derive(Debug)]
pub struct EnergyDependentAngularDistributionError(String);

impl Error for EnergyDependentAngularDistributionError {}

impl std::fmt::Display for EnergyDependentAngularDistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angular_distributions::{EquiprobableBinsAngularDistribution, TabulatedAngularDistribution};
    use crate::interpolation::InterpolationScheme;

    fn make_test_distribution() -> EnergyDependentAngularDistribution {
        let energy = vec![1.0, 2.0, 3.0];
        let isotropic = AngularDistribution::Isotropic(IsotropicAngularDistribution {});
        let tabulated = AngularDistribution::Tabulated(
            TabulatedAngularDistribution::new(
                InterpolationScheme::LinLin,
                vec![0.0, 0.5, 1.0],
                vec![0.0, 0.5, 1.0],
            )
            .unwrap(),
        );
        let equiprobable = AngularDistribution::EquiprobableBins(
            EquiprobableBinsAngularDistribution::new((0..33).map(|i| i as f64 / 32.0 - 1.0).collect())
                .unwrap(),
        );
        EnergyDependentAngularDistribution { energy, distributions: vec![isotropic, tabulated, equiprobable] }
    }

    #[test]
    fn test_sample_on_bounds() {
        let dist = make_test_distribution();
        assert_eq!(dist.sample_cos_theta_at_energy(1.0, UnitF64(0.0)).unwrap(), -1.0);
        assert_eq!(dist.sample_cos_theta_at_energy(2.0, UnitF64(0.5)).unwrap(), 0.5);
    }

    #[test]
    fn test_sample_off_bounds_interpolates() {
        let dist = make_test_distribution();
        let result = dist.sample_cos_theta_at_energy(1.5, UnitF64(0.0)).unwrap();
        assert_eq!(result, -0.5);
    }

    #[test]
    fn test_sample_out_of_range() {
        let dist = make_test_distribution();
        assert!(dist.sample_cos_theta_at_energy(4.0, UnitF64(0.0)).is_err());
        assert!(dist.sample_cos_theta_at_energy(0.0, UnitF64(0.0)).is_err());
    }
}
