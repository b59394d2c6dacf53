mod angular_distribution_types;
mod energy_angle_distribution;

pub use angular_distribution_types::{
    AngularDistribution, EquiprobableBinsAngularDistribution, IsotropicAngularDistribution,
    SampleAngle, TabulatedAngularDistribution,
};
pub use energy_angle_distribution::EnergyDependentAngularDistribution;
