//=====================================================================
// A single MT reaction: its cross section plus everything needed to
// sample an outgoing neutron when it fires. Reactions with no tabulated
// energy law (elastic scattering, almost always) fall back to free-gas
// thermal kinematics instead of a DLW/AND lookup.
//=====================================================================
use crate::api::CrossSection;
use crate::blocks::{ExitingNeutronFrameOfReference, NumberOfExitingNeutrons, ReactionEnergyDistribution};
#[cfg(test)]
use crate::blocks::{EnergyDistributionLaw, EnergyLawEntry, KalbachEnergyPoint};
use crate::angular_distributions::EnergyDependentAngularDistribution;
use crate::error::{Result, TransportError};
use crate::geometry::Vec3;
use crate::random::Random;
use crate::reactions::scatter_free_gas;
use crate::unitf64::UnitF64;

#[derive(Clone, Debug)]
pub struct Reaction {
    pub mt: usize,
    pub q_value: f64,
    pub cross_section: CrossSection,
    pub frame: ExitingNeutronFrameOfReference,
    pub neutron_release: NumberOfExitingNeutrons,
    pub angular_distribution: Option<EnergyDependentAngularDistribution>,
    pub energy_distribution: Option<ReactionEnergyDistribution>,
}

impl Reaction {
    pub fn is_absorption(&self) -> bool {
        matches!(self.neutron_release, NumberOfExitingNeutrons::Absorption)
    }

    // Sample one outgoing neutron's lab-frame energy and direction.
    // Called once per secondary neutron this reaction releases (for
    // fission, once per sampled nu).
    pub fn sample_outgoing(
        &self,
        incident_energy: f64,
        incident_direction: Vec3,
        awr: f64,
        kt: f64,
        rng: &mut Random,
    ) -> Result<(f64, Vec3)> {
        let Some(energy_distribution) = &self.energy_distribution else {
            let mu_cm = self.sample_mu(incident_energy, rng)?;
            return Ok(scatter_free_gas(incident_energy, incident_direction, awr, kt, mu_cm, rng));
        };

        let (outgoing_energy, correlated_mu) = energy_distribution.sample_energy(self.mt, incident_energy, rng)?;
        let mu = match correlated_mu {
            Some(mu) => mu,
            None => self.sample_mu(incident_energy, rng)?,
        };
        let phi = 2.0 * std::f64::consts::PI * rng.uniform();

        match self.frame {
            ExitingNeutronFrameOfReference::CenterOfMass => {
                let (lab_energy, mu_lab) = cm_to_lab(incident_energy, outgoing_energy, mu, awr);
                Ok((lab_energy, incident_direction.rotate(mu_lab, phi)))
            }
            _ => Ok((outgoing_energy, incident_direction.rotate(mu, phi))),
        }
    }

    fn sample_mu(&self, incident_energy: f64, rng: &mut Random) -> Result<f64> {
        match &self.angular_distribution {
            Some(distribution) => distribution
                .sample_cos_theta_at_energy(incident_energy, UnitF64::new_unchecked(rng.uniform()))
                .map_err(|e| TransportError::domain(e.to_string())),
            None => Ok(2.0 * rng.uniform() - 1.0),
        }
    }
}

// Convert a center-of-mass-sampled (energy, cosine) pair to the lab
// frame via the standard two-body elastic/inelastic kinematics used
// throughout ENDF-based transport codes.
fn cm_to_lab(incident_energy: f64, outgoing_energy_cm: f64, mu_cm: f64, awr: f64) -> (f64, f64) {
    let a1 = awr + 1.0;
    let lab_energy = (outgoing_energy_cm
        + (incident_energy + 2.0 * mu_cm * a1 * (incident_energy * outgoing_energy_cm).sqrt()) / (a1 * a1))
        .max(0.0);
    let mu_lab = if lab_energy > 0.0 {
        (mu_cm * (outgoing_energy_cm / lab_energy).sqrt() + (incident_energy / lab_energy).sqrt() / a1).clamp(-1.0, 1.0)
    } else {
        mu_cm
    };
    (lab_energy, mu_lab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_to_lab_matches_incident_for_equal_mass_forward_scatter() {
        // Symmetric (A=1) forward CM scatter conserves energy exactly.
        let (e, mu) = cm_to_lab(2.0, 2.0, 1.0, 1.0);
        assert!((e - 2.0).abs() < 1e-9);
        assert!((mu - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_elastic_with_no_energy_distribution_uses_free_gas() {
        let reaction = Reaction {
            mt: 2,
            q_value: 0.0,
            cross_section: CrossSection::from_e_and_sigma(vec![1.0, 2.0], vec![1.0, 1.0]),
            frame: ExitingNeutronFrameOfReference::CenterOfMass,
            neutron_release: NumberOfExitingNeutrons::Discrete(1),
            angular_distribution: None,
            energy_distribution: None,
        };
        let mut rng = Random::seed(42);
        let (energy, direction) =
            reaction.sample_outgoing(1.0, Vec3::new(1.0, 0.0, 0.0), 12.0, 2.5e-8, &mut rng).unwrap();
        assert!(energy >= 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_kalbach_mann_mu_bypasses_angular_distribution() {
        use crate::interpolation::{InterpolationScheme, InterpolationTable};

        let applicability = InterpolationTable::from_x_and_y(vec![1.0, 10.0], vec![1.0, 1.0], InterpolationScheme::LinLin);
        let point = KalbachEnergyPoint {
            scheme: InterpolationScheme::LinLin,
            cdf: vec![0.0, 1.0],
            eout: vec![0.5, 0.5],
            r: vec![0.5, 0.5],
            a: vec![1.0, 1.0],
        };
        let law = EnergyDistributionLaw::KalbachMann { energy: vec![1.0], points: vec![point] };
        let energy_distribution = ReactionEnergyDistribution { laws: vec![EnergyLawEntry { applicability, law }] };

        let reaction = Reaction {
            mt: 16,
            q_value: -7.0,
            cross_section: CrossSection::from_e_and_sigma(vec![1.0, 2.0], vec![1.0, 1.0]),
            frame: ExitingNeutronFrameOfReference::Laboratory,
            neutron_release: NumberOfExitingNeutrons::Discrete(2),
            angular_distribution: None,
            energy_distribution: Some(energy_distribution),
        };
        let mut rng = Random::seed(9);
        let (energy, direction) =
            reaction.sample_outgoing(2.0, Vec3::new(1.0, 0.0, 0.0), 12.0, 2.5e-8, &mut rng).unwrap();
        assert!((energy - 0.5).abs() < 1e-12);
        assert!((direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_is_absorption() {
        let reaction = Reaction {
            mt: 102,
            q_value: 0.0,
            cross_section: CrossSection::from_e_and_sigma(vec![1.0], vec![1.0]),
            frame: ExitingNeutronFrameOfReference::NoRelease,
            neutron_release: NumberOfExitingNeutrons::Absorption,
            angular_distribution: None,
            energy_distribution: None,
        };
        assert!(reaction.is_absorption());
    }
}
