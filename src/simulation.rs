//=====================================================================
// KeffSimulation: the per-history transport loop and the batch loop
// that wraps it. Grounded in the original engine's `Criticality`/`KeffSimulation`
// history-then-batch structure (`Transport/Particle.hpp`'s collision
// loop, generalized to this crate's cross section and geometry APIs):
// sample distance to collision, race it against distance to the
// nearest surface, resolve whichever comes first, repeat until the
// particle dies or is banked as a fission neutron for the next batch.
//=====================================================================
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;

use crate::config::SettingsSpec;
use crate::error::{Result, TransportError};
use crate::geometry::{CrossOutcome, Geometry};
use crate::logging::Logger;
use crate::material::Material;
use crate::particle::{Particle, ParticleState};
use crate::random::Random;
use crate::reactions::sample_nu;
use crate::source::Source;

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub particles: usize,
    pub inactive: usize,
    pub batches: usize,
    pub seed: u64,
}

impl Settings {
    pub fn from_spec(spec: &SettingsSpec) -> Self {
        Self { particles: spec.particles, inactive: spec.inactive, batches: spec.batches, seed: spec.seed.unwrap_or(1) }
    }
}

// Tallies errors caught at the per-history boundary instead of letting
// them unwind across the worker pool. A `DomainError` mid-history (a
// non-finite cross section, a negative interpolation denominator) just
// abandons that one history; the batch carries on.
#[derive(Default)]
pub struct Diagnostics {
    pub domain_errors: AtomicU64,
    warned: AtomicBool,
}

impl Diagnostics {
    fn note_domain_error(&self, logger: &Logger, err: &TransportError) {
        self.domain_errors.fetch_add(1, Ordering::Relaxed);
        if !self.warned.swap(true, Ordering::Relaxed) {
            logger.warn(&format!("history abandoned on a domain error ({err}); further occurrences are only counted"));
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeffEstimate {
    pub mean: f64,
    pub std_dev: f64,
    pub active_batches: usize,
}

// Online mean/variance over the active batches' k estimates (Welford).
#[derive(Default)]
struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn finish(&self) -> (f64, f64) {
        if self.count < 2 {
            return (self.mean, 0.0);
        }
        (self.mean, (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

pub struct KeffSimulation<'a> {
    pub geometry: &'a Geometry,
    pub materials: &'a [Material],
    pub source: &'a Source,
    pub settings: Settings,
    pub logger: Logger,
    pub diagnostics: Diagnostics,
}

impl<'a> KeffSimulation<'a> {
    pub fn new(geometry: &'a Geometry, materials: &'a [Material], source: &'a Source, settings: Settings, logger: Logger) -> Self {
        Self { geometry, materials, source, settings, logger, diagnostics: Diagnostics::default() }
    }

    pub fn run(&self) -> KeffEstimate {
        let master = Random::seed(self.settings.seed);
        let total_batches = self.settings.inactive + self.settings.batches;
        let mut bank: Vec<Particle> = Vec::new();
        let mut stats = RunningStats::default();

        for batch_index in 0..total_batches {
            let batch_rng = master.split(total_batches as u64, batch_index as u64);
            let result = self.run_batch(batch_index, &batch_rng, &bank);
            bank = result.0;
            let active = batch_index >= self.settings.inactive;
            let k = result.1;
            if active {
                stats.push(k);
            }
            self.logger.msg(&format!(
                "batch {:>4}/{total_batches} ({}) k = {k:.5}, banked = {}",
                batch_index + 1,
                if active { "active" } else { "inactive" },
                bank.len()
            ));
        }

        let (mean, std_dev) = stats.finish();
        KeffEstimate { mean, std_dev, active_batches: self.settings.batches }
    }

    // Runs every history of one batch in parallel, sourcing the first
    // particle of each history from `previous_bank` if it holds enough
    // entries, else from the external Source. Returns the next batch's
    // bank (resampled to exactly `particles` entries) and this batch's
    // k estimate.
    fn run_batch(&self, batch_index: usize, batch_rng: &Random, previous_bank: &[Particle]) -> (Vec<Particle>, f64) {
        let n = self.settings.particles;
        let per_history_banks: Vec<Vec<Particle>> = (0..n)
            .into_par_iter()
            .map(|history_index| {
                let mut rng = batch_rng.split(n as u64, history_index as u64);
                let initial = match previous_bank.get(history_index) {
                    Some(p) => p.clone(),
                    None => self.source.sample(&mut rng),
                };
                match self.run_history(initial, &mut rng) {
                    Ok(banked) => banked,
                    Err(err) => {
                        self.diagnostics.note_domain_error(&self.logger, &err);
                        Vec::new()
                    }
                }
            })
            .collect();

        let mut banked: Vec<Particle> = per_history_banks.into_iter().flatten().collect();
        let total_banked = banked.len();
        let k = total_banked as f64 / n as f64;

        if banked.is_empty() {
            self.logger.warn(&format!("batch {batch_index}: fission bank is empty, system is subcritical or the source missed fuel"));
            return (Vec::new(), k);
        }

        // Weight-preserving resample to exactly `n` entries: truncate if
        // over, cycle through in order if under. Every banked particle
        // carries the same weight under the analog-capture policy this
        // driver uses (see module notes), so either direction preserves
        // the bank's mean weight exactly.
        if banked.len() > n {
            banked.truncate(n);
        } else if banked.len() < n {
            let mut resampled = Vec::with_capacity(n);
            let mut i = 0;
            while resampled.len() < n {
                resampled.push(banked[i % banked.len()].clone());
                i += 1;
            }
            banked = resampled;
        }
        for particle in &mut banked {
            particle.state = ParticleState::Alive;
        }

        (banked, k)
    }

    // One particle's life: stream, collide, repeat. Fission progeny are
    // appended to the returned bank; the particle passed in is consumed.
    fn run_history(&self, mut particle: Particle, rng: &mut Random) -> Result<Vec<Particle>> {
        let mut bank = Vec::new();

        if particle.cell.is_none() {
            particle.cell = self.geometry.find_cell(self.geometry.base_universe, particle.position, None);
        }

        while particle.is_alive() {
            let cell_id = particle.cell.ok_or_else(|| TransportError::domain("particle is not inside any known cell"))?;
            let cell = &self.geometry.cells[cell_id];
            let material = cell.material.map(|index| &self.materials[index]);

            let distance_to_collision = match material {
                Some(material) => -rng.uniform().ln() * material.mean_free_path(particle.energy)?,
                None => f64::INFINITY,
            };

            let crossing = self.geometry.cell_intersect(cell_id, particle.position, particle.direction);
            let distance_to_surface = crossing.map(|(_, _, d)| d).unwrap_or(f64::INFINITY);

            if distance_to_surface < distance_to_collision {
                let (surface_id, sense, distance) =
                    crossing.ok_or_else(|| TransportError::domain("particle has no bounding surface to stream toward"))?;
                particle.advance(distance);
                match self.geometry.cross_surface(surface_id, sense, &mut particle) {
                    CrossOutcome::Dead | CrossOutcome::Entered(_) => {}
                    CrossOutcome::Reflected => particle.cell = Some(cell_id),
                }
                continue;
            }

            let Some(material) = material else {
                return Err(TransportError::domain("void cell has no bounding surface within reach"));
            };
            particle.advance(distance_to_collision);
            self.collide(&mut particle, material, rng, &mut bank)?;
        }

        Ok(bank)
    }

    // Resolve one collision: branch among fission, capture, elastic and
    // inelastic scatter by cross-section-weighted probability, as the
    // original's collision loop does (`I.absorptionProb`, `I.fissionProb`).
    // This driver uses analog (not implicit) capture: a captured particle
    // is simply killed rather than weight-reduced.
    fn collide(&self, particle: &mut Particle, material: &Material, rng: &mut Random, bank: &mut Vec<Particle>) -> Result<()> {
        let isotope = material.sample_isotope(particle.energy, rng)?;

        let p_fission = isotope.fission_prob(particle.energy)?;
        let p_absorption = isotope.absorption_prob(particle.energy)?;
        let p_elastic = isotope.elastic_prob(particle.energy)?;

        let r = rng.uniform();
        if r < p_fission {
            let nu_formulation = isotope.nu_total.as_ref().or(isotope.nu_prompt.as_ref());
            let nu = match nu_formulation {
                Some(formulation) => sample_nu(formulation, particle.energy, rng)?,
                None => 1,
            };
            if let Some(reaction) = isotope.fission(particle.energy, rng) {
                for _ in 0..nu {
                    let (energy, direction) = reaction.sample_outgoing(particle.energy, particle.direction, isotope.awr, isotope.kT, rng)?;
                    let mut child = Particle::new(particle.position, direction, energy, particle.weight);
                    child.cell = particle.cell;
                    child.bank();
                    bank.push(child);
                }
            }
            particle.kill();
        } else if r < p_absorption {
            particle.kill();
        } else if r < p_absorption + p_elastic {
            let (energy, direction) = isotope.elastic().sample_outgoing(particle.energy, particle.direction, isotope.awr, isotope.kT, rng)?;
            particle.energy = energy;
            particle.direction = direction;
        } else {
            let reaction = isotope.inelastic(particle.energy, rng).unwrap_or_else(|| isotope.elastic());
            let (energy, direction) = reaction.sample_outgoing(particle.energy, particle.direction, isotope.awr, isotope.kT, rng)?;
            particle.energy = energy;
            particle.direction = direction;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Cell, Surface, SurfaceFlag, SurfaceKind, Universe};
    use crate::source::{Distribution, ParticleSampler, Source};

    // An infinite vacuum box with no material anywhere: every history
    // should terminate in at most a couple of surface crossings with a
    // k of exactly zero, since nothing ever fissions.
    fn empty_box() -> Geometry {
        let mut lo = Surface::new(0, "lo".into(), SurfaceKind::PlaneX { x: -1.0 }, SurfaceFlag::Vacuum);
        let mut hi = Surface::new(1, "hi".into(), SurfaceKind::PlaneX { x: 1.0 }, SurfaceFlag::Vacuum);
        let cell = Cell::new(0, "inside".into(), "0".into(), vec![(0, true), (1, false)]);
        lo.register_neighbor(true, 0);
        hi.register_neighbor(false, 0);
        let mut universe = Universe::new(0, "0".into(), None);
        universe.cells.push(0);
        Geometry::new(vec![lo, hi], vec![cell], vec![universe], 0)
    }

    fn point_source() -> Source {
        let sampler = ParticleSampler {
            reference_position: crate::geometry::Vec3::default(),
            reference_direction: crate::geometry::Vec3::new(1.0, 0.0, 0.0),
            energy: 1.0,
            distributions: vec![Distribution::IsotropicDirection],
        };
        Source { sources: vec![(1.0, crate::source::ParticleSource { samplers: vec![(1.0, sampler)] })] }
    }

    #[test]
    fn test_empty_vacuum_box_has_zero_k() {
        let geometry = empty_box();
        let materials: Vec<Material> = Vec::new();
        let source = point_source();
        let settings = Settings { particles: 200, inactive: 1, batches: 1, seed: 7 };
        let sim = KeffSimulation::new(&geometry, &materials, &source, settings, Logger::default());
        let estimate = sim.run();
        assert_eq!(estimate.mean, 0.0);
        assert_eq!(sim.diagnostics.domain_errors.load(Ordering::Relaxed), 0);
    }
}
