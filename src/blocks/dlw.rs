// Represents the DLW data block - energy distributions for reactions
// producing secondary neutrons. See the ACE format spec for a
// description of the DLW block and its per-reaction law chains.
use std::collections::HashMap;
use std::ops::Deref;

use crate::angular_distributions::{AngularDistribution, IsotropicAngularDistribution, SampleAngle, TabulatedAngularDistribution};
use crate::arrays::Arrays;
use crate::blocks::{BlockType, LDLW};
use crate::error::TransportError;
use crate::interpolation::{InterpolationScheme, InterpolationTable};
use crate::random::Random;
use crate::unitf64::UnitF64;

type EnergyDistributionMap = HashMap<usize, ReactionEnergyDistribution>;

//=====================================================================
// DLW data block
//
// Each reaction may chain multiple energy laws, each valid over its
// own incident-energy sub-range (given by an applicability table); the
// first law whose table assigns nonzero probability at the sampled
// incident energy is used, falling back to the last one in the chain.
//=====================================================================
#[derive(Debug, Clone)]
pub struct DLW(pub EnergyDistributionMap);

impl Deref for DLW {
    type Target = EnergyDistributionMap;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DLW {
    pub fn parse(arrays: &Arrays, ldlw: &Option<LDLW>) -> Option<Self> {
        let ldlw = ldlw.as_ref()?;
        let dlw_start = arrays.jxs.get(&BlockType::DLW);
        if dlw_start == 0 {
            return None;
        }
        let dlw_start = dlw_start - 1;

        let mut reactions = EnergyDistributionMap::new();
        for (&mt, &locator) in ldlw.iter() {
            let mut laws = Vec::new();
            let mut loc = dlw_start + locator - 1;

            loop {
                let lnw = arrays.xxs[loc].to_bits() as usize;
                let law_number = arrays.xxs[loc + 1].to_bits() as usize;
                let idat = arrays.xxs[loc + 2].to_bits() as usize;
                let nr = arrays.xxs[loc + 3].to_bits() as usize;
                let ne_index = loc + 4 + 2 * nr;
                let ne = arrays.xxs[ne_index].to_bits() as usize;
                let e_start = ne_index + 1;
                let energy = arrays.xxs[e_start..e_start + ne].to_vec();
                let prob = arrays.xxs[e_start + ne..e_start + 2 * ne].to_vec();
                let applicability = InterpolationTable::from_x_and_y(energy, prob, InterpolationScheme::LinLin);

                let law_data_start = dlw_start + idat - 1;
                let law = EnergyDistributionLaw::parse(law_number, arrays.xxs, law_data_start);

                laws.push(EnergyLawEntry { applicability, law });

                if lnw == 0 {
                    break;
                }
                loc = dlw_start + lnw - 1;
            }

            reactions.insert(mt, ReactionEnergyDistribution { laws });
        }

        Some(Self(reactions))
    }
}

impl std::fmt::Display for DLW {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DLW({} reactions)", self.len())
    }
}

#[derive(Debug, Clone)]
pub struct ReactionEnergyDistribution {
    pub laws: Vec<EnergyLawEntry>,
}

impl ReactionEnergyDistribution {
    // Returns the sampled outgoing energy and, for laws whose energy and
    // angle are correlated (Kalbach-Mann and correlated tabular), the
    // cosine that goes with it. Every other law returns `None` and
    // leaves angle sampling to the reaction's own angular distribution.
    pub fn sample_energy(
        &self,
        mt: usize,
        incident_energy: f64,
        rng: &mut Random,
    ) -> crate::error::Result<(f64, Option<f64>)> {
        let entry = self
            .laws
            .iter()
            .find(|entry| entry.applicability.interpolate(incident_energy).map(|p| p > 0.0).unwrap_or(false))
            .or_else(|| self.laws.last())
            .ok_or_else(|| TransportError::domain(format!("no energy law available for MT={mt}")))?;

        entry.law.sample(incident_energy, mt, rng)
    }
}

#[derive(Debug, Clone)]
pub struct EnergyLawEntry {
    pub applicability: InterpolationTable,
    pub law: EnergyDistributionLaw,
}

// Law 44's per-incident-energy outgoing-energy table, plus its r(E')/a(E')
// Kalbach-87 trailers sampled at the same outgoing-energy grid.
#[derive(Debug, Clone)]
pub struct KalbachEnergyPoint {
    pub scheme: InterpolationScheme,
    pub cdf: Vec<f64>,
    pub eout: Vec<f64>,
    pub r: Vec<f64>,
    pub a: Vec<f64>,
}

// Law 61's per-incident-energy outgoing-energy table, plus one angular
// distribution per outgoing-energy grid point (isotropic where the ACE
// file's LC flag says no sub-table was given for that point).
#[derive(Debug, Clone)]
pub struct CorrelatedEnergyPoint {
    pub scheme: InterpolationScheme,
    pub cdf: Vec<f64>,
    pub eout: Vec<f64>,
    pub angular: Vec<AngularDistribution>,
}

//=====================================================================
// ACE energy distribution laws. Laws 1/2/3/4/5/7/9/11/44/61 are
// implemented; laws 22/24/66/67 are left unsupported and surface a
// typed error rather than silently producing wrong physics - see the
// grounding ledger for why (the reference engine this was distilled
// from never completes sampling for them either).
//=====================================================================
#[derive(Debug, Clone)]
pub enum EnergyDistributionLaw {
    EquiprobableBins { energy: Vec<f64>, bins: Vec<Vec<f64>> },
    DiscretePhoton { lp: usize, eg: f64 },
    LevelScattering { c1: f64, c2: f64 },
    ContinuousTabular { energy: Vec<f64>, tables: Vec<InterpolationTable> },
    GeneralEvaporation { theta: InterpolationTable, cdf: Vec<f64>, x: Vec<f64> },
    MaxwellFission { theta: InterpolationTable, restriction_energy: f64 },
    Evaporation { theta: InterpolationTable, restriction_energy: f64 },
    Watt { a: InterpolationTable, b: InterpolationTable, restriction_energy: f64 },
    KalbachMann { energy: Vec<f64>, points: Vec<KalbachEnergyPoint> },
    CorrelatedTabular { energy: Vec<f64>, points: Vec<CorrelatedEnergyPoint> },
    Unsupported(usize),
}

impl EnergyDistributionLaw {
    fn parse(law_number: usize, xxs: &[f64], start: usize) -> Self {
        match law_number {
            1 => {
                let nr = xxs[start].to_bits() as usize;
                let ne_index = start + 1 + 2 * nr;
                let ne = xxs[ne_index].to_bits() as usize;
                let e_start = ne_index + 1;
                let energy = xxs[e_start..e_start + ne].to_vec();
                let net_index = e_start + ne;
                let net = xxs[net_index].to_bits() as usize;
                let bins_start = net_index + 1;
                let bins = (0..ne)
                    .map(|i| xxs[bins_start + i * net..bins_start + (i + 1) * net].to_vec())
                    .collect();
                Self::EquiprobableBins { energy, bins }
            }
            2 => {
                let lp = xxs[start].to_bits() as usize;
                let eg = xxs[start + 1];
                Self::DiscretePhoton { lp, eg }
            }
            3 => Self::LevelScattering { c1: xxs[start], c2: xxs[start + 1] },
            4 => Self::parse_continuous_tabular(xxs, start),
            5 => Self::parse_general_evaporation(xxs, start),
            7 => {
                let (theta, restriction_energy) = Self::parse_theta_and_restriction(xxs, start);
                Self::MaxwellFission { theta, restriction_energy }
            }
            9 => {
                let (theta, restriction_energy) = Self::parse_theta_and_restriction(xxs, start);
                Self::Evaporation { theta, restriction_energy }
            }
            11 => {
                let nra = xxs[start].to_bits() as usize;
                let mut offset = start + 1 + 2 * nra;
                let nea = xxs[offset].to_bits() as usize;
                offset += 1;
                let eina = xxs[offset..offset + nea].to_vec();
                offset += nea;
                let a = xxs[offset..offset + nea].to_vec();
                offset += nea;
                let a_table = InterpolationTable::from_x_and_y(eina, a, InterpolationScheme::LinLin);

                let nrb = xxs[offset].to_bits() as usize;
                offset += 1 + 2 * nrb;
                let neb = xxs[offset].to_bits() as usize;
                offset += 1;
                let einb = xxs[offset..offset + neb].to_vec();
                offset += neb;
                let b = xxs[offset..offset + neb].to_vec();
                offset += neb;
                let b_table = InterpolationTable::from_x_and_y(einb, b, InterpolationScheme::LinLin);

                let restriction_energy = xxs[offset];
                Self::Watt { a: a_table, b: b_table, restriction_energy }
            }
            44 => Self::parse_kalbach(xxs, start),
            61 => Self::parse_correlated_tabular(xxs, start),
            other => Self::Unsupported(other),
        }
    }

    fn parse_outer_grid(xxs: &[f64], start: usize) -> (Vec<f64>, Vec<usize>) {
        let nr = xxs[start].to_bits() as usize;
        let ne_index = start + 1 + 2 * nr;
        let ne = xxs[ne_index].to_bits() as usize;
        let e_start = ne_index + 1;
        let energy = xxs[e_start..e_start + ne].to_vec();
        let locators_start = e_start + ne;
        let locators = xxs[locators_start..locators_start + ne].iter().map(|&v| v.to_bits() as usize).collect();
        (energy, locators)
    }

    fn parse_continuous_tabular(xxs: &[f64], start: usize) -> Self {
        let (energy, locators) = Self::parse_outer_grid(xxs, start);
        let tables = locators
            .iter()
            .map(|&loc| {
                let table_start = start + loc - 1;
                let intt = xxs[table_start].to_bits() as usize;
                let scheme = if intt % 10 == 1 { InterpolationScheme::Histogram } else { InterpolationScheme::LinLin };
                let np = xxs[table_start + 1].to_bits() as usize;
                let eout_start = table_start + 2;
                let eout = xxs[eout_start..eout_start + np].to_vec();
                let cdf_start = eout_start + 2 * np;
                let cdf = xxs[cdf_start..cdf_start + np].to_vec();
                InterpolationTable::from_x_and_y(cdf, eout, scheme)
            })
            .collect();

        Self::ContinuousTabular { energy, tables }
    }

    // Law 44: same outer incident-energy/CDF-table layout as law 4, with
    // r(E')/a(E') Kalbach-87 trailers appended after cdf at each point.
    fn parse_kalbach(xxs: &[f64], start: usize) -> Self {
        let (energy, locators) = Self::parse_outer_grid(xxs, start);
        let points = locators
            .iter()
            .map(|&loc| {
                let table_start = start + loc - 1;
                let intt = xxs[table_start].to_bits() as usize;
                let scheme = if intt % 10 == 1 { InterpolationScheme::Histogram } else { InterpolationScheme::LinLin };
                let np = xxs[table_start + 1].to_bits() as usize;
                let eout_start = table_start + 2;
                let eout = xxs[eout_start..eout_start + np].to_vec();
                let cdf_start = eout_start + 2 * np;
                let cdf = xxs[cdf_start..cdf_start + np].to_vec();
                let r_start = cdf_start + np;
                let r = xxs[r_start..r_start + np].to_vec();
                let a_start = r_start + np;
                let a = xxs[a_start..a_start + np].to_vec();
                KalbachEnergyPoint { scheme, cdf, eout, r, a }
            })
            .collect();

        Self::KalbachMann { energy, points }
    }

    // Law 61: same outer layout again, but the per-point trailer is an
    // LC flag array (positive means "a sub-table follows"), and the
    // angular sub-tables for flagged points are laid down sequentially,
    // immediately after the flag array, in incident-energy-point order.
    fn parse_correlated_tabular(xxs: &[f64], start: usize) -> Self {
        let (energy, locators) = Self::parse_outer_grid(xxs, start);
        let points = locators
            .iter()
            .map(|&loc| {
                let table_start = start + loc - 1;
                let intt = xxs[table_start].to_bits() as usize;
                let scheme = if intt % 10 == 1 { InterpolationScheme::Histogram } else { InterpolationScheme::LinLin };
                let np = xxs[table_start + 1].to_bits() as usize;
                let eout_start = table_start + 2;
                let eout = xxs[eout_start..eout_start + np].to_vec();
                let cdf_start = eout_start + 2 * np;
                let cdf = xxs[cdf_start..cdf_start + np].to_vec();
                let lc_start = cdf_start + np;
                let lc: Vec<usize> = xxs[lc_start..lc_start + np].iter().map(|&v| v.to_bits() as usize).collect();

                let mut cursor = lc_start + np;
                let angular = lc
                    .iter()
                    .map(|&flag| {
                        if flag == 0 {
                            return AngularDistribution::Isotropic(IsotropicAngularDistribution {});
                        }
                        let sub_intt = xxs[cursor].to_bits() as usize;
                        let np2 = xxs[cursor + 1].to_bits() as usize;
                        let cos_start = cursor + 2;
                        let cos_bins = xxs[cos_start..cos_start + np2].to_vec();
                        let pdf_start = cos_start + np2;
                        let cos_cdf_start = pdf_start + np2;
                        let cos_cdf = xxs[cos_cdf_start..cos_cdf_start + np2].to_vec();
                        cursor = cos_cdf_start + np2;
                        let sub_scheme =
                            if sub_intt % 10 == 1 { InterpolationScheme::Histogram } else { InterpolationScheme::LinLin };
                        TabulatedAngularDistribution::new(sub_scheme, cos_bins, cos_cdf)
                            .map(AngularDistribution::Tabulated)
                            .unwrap_or(AngularDistribution::Isotropic(IsotropicAngularDistribution {}))
                    })
                    .collect();

                CorrelatedEnergyPoint { scheme, cdf, eout, angular }
            })
            .collect();

        Self::CorrelatedTabular { energy, points }
    }

    fn parse_theta_and_restriction(xxs: &[f64], start: usize) -> (InterpolationTable, f64) {
        let nr = xxs[start].to_bits() as usize;
        let ne_index = start + 1 + 2 * nr;
        let ne = xxs[ne_index].to_bits() as usize;
        let e_start = ne_index + 1;
        let energy = xxs[e_start..e_start + ne].to_vec();
        let theta_start = e_start + ne;
        let theta = xxs[theta_start..theta_start + ne].to_vec();
        let restriction_energy = xxs[theta_start + ne];
        (InterpolationTable::from_x_and_y(energy, theta, InterpolationScheme::LinLin), restriction_energy)
    }

    // Law 5: theta(E) table exactly like law 7/9, followed by a g(x) pdf
    // tabulated over an implicit equally-spaced [0,1] grid (no trailing
    // restriction energy). The pdf is integrated into a cdf once at parse
    // time so sampling is a single inversion rather than a rejection loop.
    fn parse_general_evaporation(xxs: &[f64], start: usize) -> Self {
        let nr = xxs[start].to_bits() as usize;
        let ne_index = start + 1 + 2 * nr;
        let ne = xxs[ne_index].to_bits() as usize;
        let e_start = ne_index + 1;
        let energy = xxs[e_start..e_start + ne].to_vec();
        let theta_start = e_start + ne;
        let theta = xxs[theta_start..theta_start + ne].to_vec();
        let theta_table = InterpolationTable::from_x_and_y(energy, theta, InterpolationScheme::LinLin);

        let net_index = theta_start + ne;
        let net = xxs[net_index].to_bits() as usize;
        let x_start = net_index + 1;
        let g = xxs[x_start..x_start + net].to_vec();
        let x: Vec<f64> = (0..net).map(|i| i as f64 / (net - 1) as f64).collect();

        let mut cdf = vec![0.0; net];
        for i in 1..net {
            cdf[i] = cdf[i - 1] + 0.5 * (g[i] + g[i - 1]) * (x[i] - x[i - 1]);
        }
        let total = *cdf.last().unwrap();
        if total > 0.0 {
            for c in cdf.iter_mut() {
                *c /= total;
            }
        }

        Self::GeneralEvaporation { theta: theta_table, cdf, x }
    }

    pub fn sample(&self, incident_energy: f64, mt: usize, rng: &mut Random) -> crate::error::Result<(f64, Option<f64>)> {
        match self {
            Self::EquiprobableBins { energy, bins } => {
                let idx = bracket_index(energy, incident_energy);
                let chosen = &bins[idx];
                let nbins = chosen.len() - 1;
                let chi = rng.uniform();
                let pos = ((chi * nbins as f64) as usize).min(nbins - 1);
                let frac = nbins as f64 * chi - pos as f64;
                Ok((chosen[pos] + frac * (chosen[pos + 1] - chosen[pos]), None))
            }
            // LP=2 ("binding energy plus recoil") would need the target
            // AWR to add the recoil correction; this sampler doesn't carry
            // AWR, so LP=2 lines come out as a flat `eg` like LP=0/1 do.
            Self::DiscretePhoton { eg, .. } => Ok((*eg, None)),
            Self::LevelScattering { c1, c2 } => Ok((c2 * (incident_energy - c1), None)),
            Self::ContinuousTabular { energy, tables } => {
                let idx = bracket_index(energy, incident_energy);
                let e = tables[idx]
                    .interpolate(rng.uniform())
                    .map_err(|_| TransportError::domain(format!("energy table interpolation failed for MT={mt}")))?;
                Ok((e, None))
            }
            Self::GeneralEvaporation { theta, cdf, x } => {
                let theta = theta_at(theta, incident_energy);
                let (xs, _) = sample_from_cdf(InterpolationScheme::LinLin, cdf, x, rng.uniform());
                Ok((xs * theta, None))
            }
            Self::MaxwellFission { theta, restriction_energy } => {
                let theta = theta_at(theta, incident_energy);
                let max_energy = incident_energy - restriction_energy;
                loop {
                    let x = -theta * rng.uniform().ln();
                    let y = -theta * rng.uniform().ln() * (std::f64::consts::FRAC_PI_2 * rng.uniform()).cos().powi(2);
                    let e = x + y;
                    if e <= max_energy {
                        return Ok((e, None));
                    }
                }
            }
            Self::Evaporation { theta, restriction_energy } => {
                let theta = theta_at(theta, incident_energy);
                let max_energy = incident_energy - restriction_energy;
                loop {
                    let e = -theta * (rng.uniform() * rng.uniform()).ln();
                    if e <= max_energy {
                        return Ok((e, None));
                    }
                }
            }
            Self::Watt { a, b, restriction_energy } => {
                let a = theta_at(a, incident_energy);
                let b = theta_at(b, incident_energy);
                let c = 1.0 + a * b / 8.0;
                let g = (c * c - 1.0).sqrt() + c;
                loop {
                    let energy;
                    loop {
                        let r1 = rng.uniform().ln();
                        let d = (1.0 - g) * (1.0 - r1) - rng.uniform().ln();
                        energy = -a * g * r1;
                        if d * d <= b * energy {
                            break;
                        }
                    }
                    if energy <= incident_energy - restriction_energy {
                        return Ok((energy, None));
                    }
                }
            }
            Self::KalbachMann { energy, points } => {
                let idx = bracket_index(energy, incident_energy);
                let point = &points[idx];
                let (eout, pidx) = sample_from_cdf(point.scheme, &point.cdf, &point.eout, rng.uniform());
                let r = interpolate_at(&point.eout, &point.r, pidx, eout).clamp(0.0, 1.0);
                let a = interpolate_at(&point.eout, &point.a, pidx, eout);

                let chi = rng.uniform();
                let rho = rng.uniform();
                let mu = if chi > r {
                    let t = (2.0 * rho - 1.0) * a.sinh();
                    (t + (t * t + 1.0).sqrt()).ln() / a
                } else {
                    (rho * a.exp() + (1.0 - rho) * (-a).exp()).ln() / a
                };
                Ok((eout, Some(mu)))
            }
            Self::CorrelatedTabular { energy, points } => {
                let idx = bracket_index(energy, incident_energy);
                let point = &points[idx];
                let (eout, pidx) = sample_from_cdf(point.scheme, &point.cdf, &point.eout, rng.uniform());
                let pidx = pidx.min(point.angular.len() - 1);
                let mu = point.angular[pidx]
                    .sample_cos_theta(UnitF64::new_unchecked(rng.uniform()))
                    .map_err(|e| TransportError::domain(e.to_string()))?;
                Ok((eout, Some(mu)))
            }
            Self::Unsupported(law) => Err(TransportError::unsupported_law(mt, *law)),
        }
    }
}

fn theta_at(table: &InterpolationTable, energy: f64) -> f64 {
    table.interpolate(energy).unwrap_or_else(|_| table.last().unwrap().data.last().unwrap().y)
}

fn bracket_index(energy: &[f64], value: f64) -> usize {
    match energy.binary_search_by(|e| e.partial_cmp(&value).unwrap()) {
        Ok(idx) => idx,
        Err(0) => 0,
        Err(idx) if idx >= energy.len() => energy.len() - 1,
        Err(idx) => idx - 1,
    }
}

// Invert a (cdf, eout) table at `u`, returning both the sampled value
// and the bracket index - needed by Kalbach-Mann and law 61, which must
// look up a correlated quantity (r/a, or an angular sub-table) at the
// same outgoing-energy grid point the energy came from.
fn sample_from_cdf(scheme: InterpolationScheme, cdf: &[f64], eout: &[f64], u: f64) -> (f64, usize) {
    let idx = match cdf.binary_search_by(|c| c.partial_cmp(&u).unwrap()) {
        Ok(idx) => idx.min(cdf.len().saturating_sub(2)),
        Err(0) => 0,
        Err(idx) if idx >= cdf.len() => cdf.len() - 2,
        Err(idx) => idx - 1,
    };
    let (c0, c1, e0, e1) = (cdf[idx], cdf[idx + 1], eout[idx], eout[idx + 1]);
    let value = match scheme {
        InterpolationScheme::Histogram => e0,
        _ if (c1 - c0).abs() < 1e-300 => e0,
        _ => e0 + (e1 - e0) * (u - c0) / (c1 - c0),
    };
    (value, idx)
}

// Linearly interpolate `y` at `x_val` within the bracket `[x[idx], x[idx+1]]`
// found by `sample_from_cdf` - used for Kalbach's r(E')/a(E') trailers,
// which share the outgoing-energy grid of the table just sampled.
fn interpolate_at(x: &[f64], y: &[f64], idx: usize, x_val: f64) -> f64 {
    let idx = idx.min(x.len() - 2);
    let (x0, x1, y0, y1) = (x[idx], x[idx + 1], y[idx], y[idx + 1]);
    if (x1 - x0).abs() < 1e-300 {
        y0
    } else {
        y0 + (y1 - y0) * (x_val - x0) / (x1 - x0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_scattering_is_deterministic() {
        let law = EnergyDistributionLaw::LevelScattering { c1: 0.1, c2: 0.98 };
        let mut rng = Random::seed(1);
        let (e, mu) = law.sample(2.0, 16, &mut rng).unwrap();
        assert!((e - 0.98 * 1.9).abs() < 1e-12);
        assert!(mu.is_none());
    }

    #[test]
    fn test_unsupported_law_errors() {
        let law = EnergyDistributionLaw::Unsupported(66);
        let mut rng = Random::seed(1);
        assert!(law.sample(2.0, 16, &mut rng).is_err());
    }

    #[test]
    fn test_bracket_index() {
        let energy = vec![1.0, 2.0, 3.0];
        assert_eq!(bracket_index(&energy, 0.5), 0);
        assert_eq!(bracket_index(&energy, 1.5), 0);
        assert_eq!(bracket_index(&energy, 2.5), 1);
        assert_eq!(bracket_index(&energy, 10.0), 2);
    }

    #[test]
    fn test_discrete_photon_returns_flat_energy() {
        let law = EnergyDistributionLaw::DiscretePhoton { lp: 0, eg: 0.5 };
        let mut rng = Random::seed(2);
        let (e, mu) = law.sample(3.0, 102, &mut rng).unwrap();
        assert_eq!(e, 0.5);
        assert!(mu.is_none());
    }

    #[test]
    fn test_general_evaporation_samples_within_theta_scaled_range() {
        let theta = InterpolationTable::from_x_and_y(vec![1.0, 10.0], vec![1.0, 1.0], InterpolationScheme::LinLin);
        let x = vec![0.0, 0.5, 1.0];
        let cdf = vec![0.0, 0.5, 1.0];
        let law = EnergyDistributionLaw::GeneralEvaporation { theta, cdf, x };
        let mut rng = Random::seed(4);
        for _ in 0..20 {
            let (e, mu) = law.sample(5.0, 18, &mut rng).unwrap();
            assert!(e >= 0.0 && e <= 1.0);
            assert!(mu.is_none());
        }
    }

    #[test]
    fn test_kalbach_mann_returns_correlated_mu_in_range() {
        let point = KalbachEnergyPoint {
            scheme: InterpolationScheme::LinLin,
            cdf: vec![0.0, 0.5, 1.0],
            eout: vec![0.0, 1.0, 2.0],
            r: vec![0.5, 0.5, 0.5],
            a: vec![1.0, 1.0, 1.0],
        };
        let law = EnergyDistributionLaw::KalbachMann { energy: vec![1.0, 10.0], points: vec![point.clone(), point] };
        let mut rng = Random::seed(6);
        for _ in 0..50 {
            let (e, mu) = law.sample(2.0, 16, &mut rng).unwrap();
            assert!(e >= 0.0 && e <= 2.0);
            let mu = mu.expect("kalbach-mann must correlate a mu with its energy");
            assert!((-1.0..=1.0).contains(&mu));
        }
    }

    #[test]
    fn test_correlated_tabular_uses_angular_subtable_when_present() {
        let tabulated =
            TabulatedAngularDistribution::new(InterpolationScheme::LinLin, vec![-1.0, 1.0], vec![0.0, 1.0]).unwrap();
        let point = CorrelatedEnergyPoint {
            scheme: InterpolationScheme::LinLin,
            cdf: vec![0.0, 1.0],
            eout: vec![0.0, 1.0],
            angular: vec![AngularDistribution::Tabulated(tabulated), AngularDistribution::Isotropic(IsotropicAngularDistribution {})],
        };
        let law = EnergyDistributionLaw::CorrelatedTabular { energy: vec![1.0], points: vec![point] };
        let mut rng = Random::seed(8);
        let (e, mu) = law.sample(1.0, 91, &mut rng).unwrap();
        assert!(e >= 0.0 && e <= 1.0);
        assert!(mu.is_some());
    }
}
