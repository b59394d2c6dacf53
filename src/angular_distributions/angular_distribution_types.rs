use std::error::Error;
use std::ops::Deref;

use crate::interpolation::{InterpolationScheme, InterpolationTable};
use crate::unitf64::UnitF64;

// Sample the cosine of the scattering angle from a given angular
// distribution, given a random number in [0, 1]. As with all sampling
// methods in this crate, the caller is responsible for providing a
// value in range; this is checked in debug builds only.
pub trait SampleAngle {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, Box<dyn Error>>;
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq)]
pub enum AngularDistribution {
    Isotropic(IsotropicAngularDistribution),
    Tabulated(TabulatedAngularDistribution),
    EquiprobableBins(EquiprobableBinsAngularDistribution),
}

impl SampleAngle for AngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, Box<dyn Error>> {
        match self {
            AngularDistribution::Isotropic(distribution) => distribution.sample_cos_theta(unitf64),
            AngularDistribution::Tabulated(distribution) => distribution.sample_cos_theta(unitf64),
            AngularDistribution::EquiprobableBins(distribution) => distribution.sample_cos_theta(unitf64),
        }
    }
}

#[derive(Debug)]
pub struct AngularDistributionError(String);

impl Error for AngularDistributionError {}

impl std::fmt::Display for AngularDistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd, Eq)]
pub struct IsotropicAngularDistribution {}

impl SampleAngle for IsotropicAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, Box<dyn Error>> {
        Ok(2.0 * unitf64.0 - 1.0)
    }
}

// Tabulated cosine of the scattering angle with interpolation, sampled
// by CDF inversion: the table's x axis is the CDF, its y axis is cos(theta).
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq)]
pub struct TabulatedAngularDistribution(pub InterpolationTable);

impl Deref for TabulatedAngularDistribution {
    type Target = InterpolationTable;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TabulatedAngularDistribution {
    pub fn new(
        interpolation_scheme: InterpolationScheme,
        cos_theta_bins: Vec<f64>,
        cos_theta_cdf: Vec<f64>,
    ) -> Result<Self, AngularDistributionError> {
        if interpolation_scheme != InterpolationScheme::Histogram
            && interpolation_scheme != InterpolationScheme::LinLin
        {
            return Err(AngularDistributionError(format!(
                "unsupported interpolation scheme for tabulated angular distribution: {:?}",
                interpolation_scheme
            )));
        }
        if cos_theta_bins.len() != cos_theta_cdf.len() {
            return Err(AngularDistributionError(format!(
                "cos_theta_bins ({}) and cos_theta_cdf ({}) must be of the same length",
                cos_theta_bins.len(),
                cos_theta_cdf.len()
            )));
        }
        let cos_theta_table =
            InterpolationTable::from_x_and_y(cos_theta_cdf, cos_theta_bins, interpolation_scheme);
        Ok(Self(cos_theta_table))
    }
}

impl SampleAngle for TabulatedAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, Box<dyn Error>> {
        Ok(self.interpolate(unitf64.0)?)
    }
}

// 32 equiprobable bins of cos(theta) (33 boundary points).
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq)]
pub struct EquiprobableBinsAngularDistribution(pub InterpolationTable);

impl Deref for EquiprobableBinsAngularDistribution {
    type Target = InterpolationTable;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl EquiprobableBinsAngularDistribution {
    const CAPACITY: usize = 33;

    pub fn new(cos_theta_bins: Vec<f64>) -> Result<Self, AngularDistributionError> {
        if cos_theta_bins.len() != Self::CAPACITY {
            return Err(AngularDistributionError(format!(
                "expected {} cos(theta) bin boundaries, got {}",
                Self::CAPACITY,
                cos_theta_bins.len()
            )));
        }
        for &cos_theta in &cos_theta_bins {
            if !(-1.0..=1.0).contains(&cos_theta) {
                return Err(AngularDistributionError(format!(
                    "cos(theta) bin value {cos_theta} is out of range [-1, 1]"
                )));
            }
        }

        let mut cos_theta_bins = cos_theta_bins;
        cos_theta_bins.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let cos_theta_cdf: Vec<f64> =
            (0..Self::CAPACITY).map(|i| i as f64 / (Self::CAPACITY - 1) as f64).collect();

        let cos_theta_table =
            InterpolationTable::from_x_and_y(cos_theta_cdf, cos_theta_bins, InterpolationScheme::LinLin);
        Ok(Self(cos_theta_table))
    }
}

impl SampleAngle for EquiprobableBinsAngularDistribution {
    fn sample_cos_theta(&self, unitf64: UnitF64) -> Result<f64, Box<dyn Error>> {
        Ok(self.interpolate(unitf64.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isotropic_angular_distribution() {
        let distribution = IsotropicAngularDistribution {};
        assert_eq!(distribution.sample_cos_theta(UnitF64(0.5)).unwrap(), 0.0);
        assert_eq!(distribution.sample_cos_theta(UnitF64(0.0)).unwrap(), -1.0);
        assert_eq!(distribution.sample_cos_theta(UnitF64(1.0)).unwrap(), 1.0);
    }

    #[test]
    fn test_tabulated_angular_distribution() {
        let distribution = TabulatedAngularDistribution::new(
            InterpolationScheme::LinLin,
            vec![-1.0, 0.0, 1.0],
            vec![0.0, 0.5, 1.0],
        )
        .unwrap();
        assert_eq!(distribution.sample_cos_theta(UnitF64(0.25)).unwrap(), -0.5);
        assert_eq!(distribution.sample_cos_theta(UnitF64(0.5)).unwrap(), 0.0);
    }

    #[test]
    fn test_tabulated_angular_distribution_invalid_interpolation() {
        assert!(TabulatedAngularDistribution::new(
            InterpolationScheme::LogLog,
            vec![-1.0, 0.0, 1.0],
            vec![0.0, 0.5, 1.0],
        )
        .is_err());
    }

    #[test]
    fn test_equiprobable_bins_angular_distribution() {
        let cos_theta_bins: Vec<f64> =
            (0..33).map(|i| i as f64 / 32.0 * 2.0 - 1.0).collect();
        let distribution = EquiprobableBinsAngularDistribution::new(cos_theta_bins).unwrap();
        assert_eq!(distribution.sample_cos_theta(UnitF64(0.0)).unwrap(), -1.0);
        assert_eq!(distribution.sample_cos_theta(UnitF64(1.0)).unwrap(), 1.0);
    }

    #[test]
    fn test_equiprobable_bins_angular_distribution_invalid_bins() {
        let cos_theta_bins = vec![-1.0, 0.0, 0.1, 1.0];
        assert!(EquiprobableBinsAngularDistribution::new(cos_theta_bins).is_err());
    }
}
