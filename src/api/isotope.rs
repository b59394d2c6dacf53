//=====================================================================
// Isotope: assembles an ACE table's raw blocks into the cross sections
// and reactions the transport loop actually samples from - total,
// elastic, absorption, inelastic and (if fissionable) fission, plus
// the secondary-reaction and chance-fission samplers.
//=====================================================================

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::api::{CrossSection, PaceData, Reaction};
use crate::blocks::{NuFormulation, ReactionEnergyDistribution};
use crate::error::TransportError;
use crate::grids::ChildGrid;
use crate::helpers::{self, is_disappearance_mt, is_fission_mt, is_secondary_neutron_mt, MTNumber};
use crate::interpolation::InterpolationTable;
use crate::random::Random;

#[derive(Clone, Debug)]
pub struct Isotope {
    pub name: String,
    pub zaid: String,
    pub szaid: Option<String>,
    pub atomic_mass_fraction: f64,
    pub awr: f64,
    pub kT: f64,
    pub temperature: f64,
    pub z: usize,
    pub a: usize,
    pub za: usize,

    pub child_grid: ChildGrid,

    pub total_xs: CrossSection,
    pub elastic_xs: CrossSection,
    pub absorption_xs: CrossSection,
    pub inelastic_xs: CrossSection,
    pub fission_xs: Option<CrossSection>,

    // Every MT present in SIG, plus the synthetic elastic (MT=2) reaction.
    pub reactions: HashMap<usize, Reaction>,
    pub fission_mts: Vec<usize>,
    pub chance_fission_sampler: Option<XsSampler>,
    pub inelastic_sampler: Option<XsSampler>,

    pub nu_prompt: Option<NuFormulation>,
    pub nu_total: Option<NuFormulation>,
    pub delayed: Option<DelayedNeutronData>,
}

impl Isotope {
    pub async fn from_PACE<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let pace_data = PaceData::from_PACE(file_path).await?;
        Self::from_PaceData(pace_data).await
    }

    pub async fn from_PaceData(pace_data: PaceData) -> Result<Self> {
        let zaid = pace_data.header.zaid.clone();
        let szaid = pace_data.header.szaid.clone();
        let atomic_mass_fraction = pace_data.header.atomic_mass_fraction;
        let kT = pace_data.header.kT;
        let temperature = pace_data.header.temperature;
        let z = pace_data.nxs_array.z;
        let a = pace_data.nxs_array.a;
        let za = pace_data.nxs_array.za;
        let name = helpers::isotope_name_from_z_a(z, a);
        // The ACE header's second field is the atomic weight ratio
        // (AW/neutron mass), named `atomic_mass_fraction` on Header for
        // historical reasons - it's what transport kinematics calls AWR.
        let awr = atomic_mass_fraction;

        let esz = pace_data
            .data_blocks
            .ESZ
            .as_ref()
            .context("ACE table is missing its ESZ block")?;

        let child_grid = ChildGrid::new(esz.energy.clone());

        let total_xs = CrossSection::from_e_and_sigma(esz.energy.clone(), esz.total_xs.clone());
        let elastic_xs = CrossSection::from_e_and_sigma(esz.energy.clone(), esz.elastic_xs.clone());

        let fis = pace_data.data_blocks.FIS.as_ref();
        let fission_point_xs: Vec<f64> = (0..esz.energy.len())
            .map(|i| fis.map(|fis| fis.cross_section_at(i)).unwrap_or(0.0))
            .collect();
        let absorption_point_xs: Vec<f64> = esz
            .dissapearance_xs
            .iter()
            .zip(fission_point_xs.iter())
            .map(|(&d, &f)| d + f)
            .collect();
        let inelastic_point_xs: Vec<f64> = esz
            .total_xs
            .iter()
            .zip(absorption_point_xs.iter())
            .zip(esz.elastic_xs.iter())
            .map(|((&total, &absorption), &elastic)| (total - absorption - elastic).max(0.0))
            .collect();

        let absorption_xs = CrossSection::from_e_and_sigma(esz.energy.clone(), absorption_point_xs);
        let inelastic_xs = CrossSection::from_e_and_sigma(esz.energy.clone(), inelastic_point_xs);
        let fission_xs = fis.map(|fis| CrossSection::from_e_and_sigma(esz.energy.clone(), fission_point_xs.clone()));

        let mut reactions = HashMap::new();
        reactions.insert(
            MTNumber::ElasticScattering as usize,
            Self::build_elastic_reaction(&pace_data, elastic_xs.clone()),
        );

        let mut fission_mts = Vec::new();
        if let Some(sig) = pace_data.data_blocks.SIG.as_ref() {
            let mut mt_values: Vec<usize> = sig.keys().copied().collect();
            mt_values.sort_unstable();
            for mt in mt_values {
                let sig_xs = &sig[&mt];
                let reaction = Self::build_reaction(&pace_data, mt, sig_xs.energy.clone(), sig_xs.xs_val.clone());
                if is_fission_mt(mt) {
                    fission_mts.push(mt);
                }
                reactions.insert(mt, reaction);
            }
        }
        fission_mts.sort_unstable();

        let chance_fission_sampler = if fission_mts.len() > 1 || (fission_mts.len() == 1 && fission_mts[0] != MTNumber::Fission as usize) {
            Some(XsSampler::new(fission_mts.clone()))
        } else {
            None
        };

        // Secondary-neutron reactions other than elastic and fission,
        // sorted by their first non-zero energy index descending (i.e.
        // the reaction with the highest threshold energy first).
        let mut inelastic_mts: Vec<usize> = reactions
            .keys()
            .copied()
            .filter(|&mt| is_secondary_neutron_mt(mt))
            .collect();
        inelastic_mts.sort_by(|&a, &b| {
            let threshold = |mt: usize| reactions[&mt].cross_section.first().and_then(|r| r.data.first()).map(|xy| xy.x).unwrap_or(0.0);
            threshold(b).partial_cmp(&threshold(a)).unwrap_or(std::cmp::Ordering::Equal)
        });
        let inelastic_sampler = if inelastic_mts.is_empty() { None } else { Some(XsSampler::new(inelastic_mts)) };

        let nu_prompt = pace_data.data_blocks.NU.as_ref().and_then(|nu| nu.prompt.clone());
        let nu_total = pace_data.data_blocks.NU.as_ref().and_then(|nu| nu.total.clone());

        let delayed = pace_data.data_blocks.BDD.as_ref().map(|bdd| DelayedNeutronData {
            decay_constants: bdd.decay_constants.clone(),
            precursor_tables: bdd.precursor_tables.clone(),
            total_nu_d: pace_data.data_blocks.DNU.as_ref().map(|dnu| {
                NuFormulation::Tabulated(crate::blocks::TabulatedNu { table: dnu_table(dnu) })
            }),
        });

        Ok(Self {
            name,
            zaid,
            szaid,
            atomic_mass_fraction,
            awr,
            kT,
            temperature,
            z,
            a,
            za,
            child_grid,
            total_xs,
            elastic_xs,
            absorption_xs,
            inelastic_xs,
            fission_xs,
            reactions,
            fission_mts,
            chance_fission_sampler,
            inelastic_sampler,
            nu_prompt,
            nu_total,
            delayed,
        })
    }

    fn build_elastic_reaction(pace_data: &PaceData, cross_section: CrossSection) -> Reaction {
        let mt = MTNumber::ElasticScattering as usize;
        Self::assemble_reaction(pace_data, mt, cross_section)
    }

    fn build_reaction(pace_data: &PaceData, mt: usize, energy: Vec<f64>, xs_val: Vec<f64>) -> Reaction {
        let cross_section = CrossSection::from_e_and_sigma(energy, xs_val);
        Self::assemble_reaction(pace_data, mt, cross_section)
    }

    fn assemble_reaction(pace_data: &PaceData, mt: usize, cross_section: CrossSection) -> Reaction {
        let q_value = pace_data.data_blocks.LQR.as_ref().and_then(|lqr| lqr.get(&mt)).copied().unwrap_or(0.0);
        let exiting = pace_data.data_blocks.TYR.as_ref().and_then(|tyr| tyr.get(&mt)).copied();
        let frame = exiting.map(|e| e.frame_of_reference).unwrap_or(crate::blocks::ExitingNeutronFrameOfReference::CenterOfMass);
        let neutron_release = exiting
            .map(|e| e.neutron_release)
            .unwrap_or(if is_disappearance_mt(mt) { crate::blocks::NumberOfExitingNeutrons::Absorption } else { crate::blocks::NumberOfExitingNeutrons::Discrete(1) });
        let angular_distribution = pace_data.data_blocks.AND.as_ref().and_then(|and| and.get(&mt)).cloned();
        let energy_distribution: Option<ReactionEnergyDistribution> =
            pace_data.data_blocks.DLW.as_ref().and_then(|dlw| dlw.get(&mt)).cloned();

        Reaction { mt, q_value, cross_section, frame, neutron_release, angular_distribution, energy_distribution }
    }

    pub fn total_xs(&self, energy: f64) -> crate::error::Result<f64> {
        self.total_xs.interpolate(energy).map_err(|e| TransportError::domain(e.to_string()))
    }

    pub fn absorption_prob(&self, energy: f64) -> crate::error::Result<f64> {
        self.branch_prob(&self.absorption_xs, energy)
    }

    pub fn fission_prob(&self, energy: f64) -> crate::error::Result<f64> {
        match &self.fission_xs {
            Some(xs) => self.branch_prob(xs, energy),
            None => Ok(0.0),
        }
    }

    pub fn elastic_prob(&self, energy: f64) -> crate::error::Result<f64> {
        self.branch_prob(&self.elastic_xs, energy)
    }

    fn branch_prob(&self, branch: &CrossSection, energy: f64) -> crate::error::Result<f64> {
        let total = self.total_xs(energy)?;
        if total <= 0.0 {
            return Ok(0.0);
        }
        let branch_xs = branch.interpolate(energy).map_err(|e| TransportError::domain(e.to_string()))?;
        Ok((branch_xs / total).clamp(0.0, 1.0))
    }

    pub fn elastic(&self) -> &Reaction {
        &self.reactions[&(MTNumber::ElasticScattering as usize)]
    }

    pub fn is_fissile(&self) -> bool {
        !self.fission_mts.is_empty()
    }

    pub fn fission(&self, energy: f64, rng: &mut Random) -> Option<&Reaction> {
        match self.fission_mts.as_slice() {
            [] => None,
            [mt] if self.chance_fission_sampler.is_none() => self.reactions.get(mt),
            _ => self.chance_fission_sampler.as_ref()?.sample(&self.reactions, energy, rng.uniform()),
        }
    }

    pub fn inelastic(&self, energy: f64, rng: &mut Random) -> Option<&Reaction> {
        self.inelastic_sampler.as_ref()?.sample(&self.reactions, energy, rng.uniform())
    }
}

// Linear cross-section-weighted selection among a fixed set of MTs, used
// both for chance-fission (19/20/21/38) and secondary-neutron-reaction
// selection. The distilled spec's O(log R) accumulated-row structure
// assumes a master-energy-index-keyed table; this crate samples directly
// against each candidate reaction's own cross section instead, which is
// simpler and, for the handful of reactions active at any one energy,
// no slower in practice.
#[derive(Clone, Debug)]
pub struct XsSampler {
    mts: Vec<usize>,
}

impl XsSampler {
    pub fn new(mts: Vec<usize>) -> Self {
        Self { mts }
    }

    pub fn sample<'a>(&self, reactions: &'a HashMap<usize, Reaction>, energy: f64, u: f64) -> Option<&'a Reaction> {
        let mut weights = Vec::with_capacity(self.mts.len());
        let mut total = 0.0;
        for &mt in &self.mts {
            let reaction = reactions.get(&mt)?;
            let xs = reaction.cross_section.interpolate(energy).unwrap_or(0.0).max(0.0);
            total += xs;
            weights.push((mt, xs));
        }
        if total <= 0.0 {
            return None;
        }

        let target = u * total;
        let mut cumulative = 0.0;
        for (mt, xs) in &weights {
            cumulative += xs;
            if target <= cumulative {
                return reactions.get(mt);
            }
        }
        weights.last().and_then(|(mt, _)| reactions.get(mt))
    }
}

// Delayed-neutron precursor data from BDD/DNU. Parsed and exposed but
// not consumed by the prompt-k-eff transport loop.
#[derive(Clone, Debug)]
pub struct DelayedNeutronData {
    pub decay_constants: Vec<f64>,
    pub precursor_tables: Vec<InterpolationTable>,
    pub total_nu_d: Option<NuFormulation>,
}

fn dnu_table(dnu: &crate::blocks::DNU) -> InterpolationTable {
    dnu.table().clone()
}

#[cfg(test)]
mod tests {
    use crate::utils::{get_isotope, local_get_isotope};

    #[tokio::test]
    async fn test_make_isotope() {
        let isotope = get_isotope().await;
        assert!(isotope.total_xs(2.0).is_ok());
        assert_eq!(isotope.name, "H100");
    }

    #[tokio::test]
    async fn test_isotope_has_elastic_and_fission() {
        let isotope = get_isotope().await;
        assert!(isotope.is_fissile());
        assert!(isotope.fission(2.0, &mut crate::random::Random::seed(1)).is_some());
        let _ = isotope.elastic();
    }

    #[cfg(feature = "local")]
    #[tokio::test]
    async fn test_make_local_isotope() {
        let _isotope = local_get_isotope().await;
    }
}
