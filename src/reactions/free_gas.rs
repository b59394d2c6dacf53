use crate::geometry::Vec3;
use crate::random::Random;

// Below this incident energy (MeV, expressed as a multiple of kT), the
// target nucleus's thermal motion is not negligible relative to the
// neutron's speed and free-gas target velocity sampling kicks in.
// Above it, and only for awr > 1 (hydrogen's own thermal motion never
// becomes negligible relative to its own recoil), the target is
// assumed at rest, which is both cheaper and numerically better
// behaved since the rejection sampler's acceptance rate degrades as
// the neutron speed grows relative to the target's thermal speed.
pub const FREE_GAS_THRESHOLD_EV: f64 = 400.0;

// Sample a target velocity for free-gas elastic scattering using the
// standard MCNP/OpenMC rejection scheme (Cullen & Weisbin / Gelbard):
// draw a speed from `sqrt(y^2 + z^2)` distributed Maxwellian candidates
// for the target-to-neutron speed ratio, accepting with probability
// proportional to the relative speed. `beta_times_v_n = v_n / v_t_most_probable`
// where `v_t_most_probable = sqrt(2 kT / (A*m_n))`; working in the same
// "speed" units as `Isotope` (sqrt(energy / awr)) lets the mass factors
// cancel, so callers pass `awr` (target mass in neutron masses) and the
// neutron's lab-frame speed `speed_n = sqrt(energy)`.
pub fn sample_target_speed(awr: f64, speed_n: f64, kt: f64, direction_n: Vec3, rng: &mut Random) -> Vec3 {
    let beta = (awr / kt).sqrt();
    let y = beta * speed_n;

    loop {
        let (speed_t, mu) = if rng.uniform() < 2.0 / (2.0 + std::f64::consts::FRAC_2_SQRT_PI * y) {
            let x = (-rng.uniform().ln() - rng.uniform().ln()).sqrt();
            (x, 2.0 * rng.uniform() - 1.0)
        } else {
            let cos_theta = (std::f64::consts::PI * rng.uniform()).cos();
            let x = (-rng.uniform().ln() - rng.uniform().ln() * cos_theta * cos_theta).sqrt();
            (x, cos_theta)
        };

        let relative_speed = (y * y + speed_t * speed_t - 2.0 * y * speed_t * mu).sqrt();
        let acceptance = relative_speed / (y + speed_t);
        if rng.uniform() < acceptance {
            let target_direction = isotropic_tilted(direction_n, mu, rng);
            return target_direction * (speed_t / beta);
        }
    }
}

// Build a unit vector at polar cosine `mu` from `axis`, with a uniform
// azimuthal angle, by rotating `axis` itself (reusing its own
// `rotate`, which is defined relative to the vector it's called on).
fn isotropic_tilted(axis: Vec3, mu: f64, rng: &mut Random) -> Vec3 {
    let phi = 2.0 * std::f64::consts::PI * rng.uniform();
    axis.rotate(mu, phi)
}

// Two-body elastic scattering kinematics: given the incident lab-frame
// energy `energy` and target mass `awr` (neutron masses), compute the
// free-gas target velocity and boost the CM-frame scattering cosine
// `mu_cm` back to the lab frame. The caller samples `mu_cm` itself -
// from the reaction's tabulated angular distribution when it has one,
// isotropic otherwise - since this helper only knows about target
// thermal motion, not angular data.
pub fn scatter_free_gas(energy: f64, direction: Vec3, awr: f64, kt: f64, mu_cm: f64, rng: &mut Random) -> (f64, Vec3) {
    let speed_n = energy.sqrt();

    let target_velocity = if energy > FREE_GAS_THRESHOLD_EV * kt && awr > 1.0 {
        Vec3::default()
    } else {
        sample_target_speed(awr, speed_n, kt, direction, rng)
    };

    // Neutron velocity in the "speed" convention (v = sqrt(E), so the
    // m/2 factor cancels throughout - only ratios of speed matter below).
    let v_n = direction * speed_n;
    let v_cm = (v_n + target_velocity * awr) * (1.0 / (1.0 + awr));
    let v_n_cm = v_n - v_cm;
    let speed_n_cm = v_n_cm.length();

    let phi = 2.0 * std::f64::consts::PI * rng.uniform();
    let axis = if speed_n_cm > 1e-300 { v_n_cm * (1.0 / speed_n_cm) } else { direction };
    let scattered_cm = axis.rotate(mu_cm, phi) * speed_n_cm;

    let v_n_out = scattered_cm + v_cm;
    let speed_out = v_n_out.length();
    let energy_out = speed_out * speed_out;
    let direction_out = if speed_out > 1e-300 { v_n_out * (1.0 / speed_out) } else { direction };

    (energy_out, direction_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heavy_target_barely_perturbs_energy() {
        let mut rng = Random::seed(11);
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let mu_cm = 2.0 * rng.uniform() - 1.0;
        let (energy_out, _) = scatter_free_gas(2.0, direction, 238.0, 2.5e-8, mu_cm, &mut rng);
        // A very heavy, cold target should leave the neutron's energy
        // close to unchanged on average over a handful of draws.
        assert!(energy_out > 0.0);
        assert!((energy_out - 2.0).abs() / 2.0 < 0.5);
    }

    #[test]
    fn test_scattered_direction_is_unit_length() {
        let mut rng = Random::seed(3);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let mu_cm = 2.0 * rng.uniform() - 1.0;
        let (_, direction_out) = scatter_free_gas(1.0, direction, 1.0, 2.5e-8, mu_cm, &mut rng);
        assert!((direction_out.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_above_threshold_assumes_target_at_rest() {
        // awr > 1 and E > 400*kT: target should be exactly stationary,
        // so the result is deterministic given the incident direction/energy.
        let mut rng = Random::seed(5);
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let mu_cm = 2.0 * rng.uniform() - 1.0;
        let (energy_out, _) = scatter_free_gas(100.0, direction, 12.0, 2.5e-8, mu_cm, &mut rng);
        assert!(energy_out >= 0.0 && energy_out <= 100.0 + 1e-6);
    }

    #[test]
    fn test_hydrogen_always_samples_target_motion() {
        // awr == 1 (hydrogen): even well above the thermal threshold, the
        // spec's stationary-target shortcut requires awr > 1, so motion
        // sampling still kicks in and the outgoing energy can exceed the
        // incident energy slightly due to target recoil contribution.
        let mut rng = Random::seed(7);
        let direction = Vec3::new(1.0, 0.0, 0.0);
        let mu_cm = 2.0 * rng.uniform() - 1.0;
        let (energy_out, direction_out) = scatter_free_gas(100.0, direction, 1.0, 2.5e-8, mu_cm, &mut rng);
        assert!(energy_out >= 0.0);
        assert!((direction_out.length() - 1.0).abs() < 1e-6);
    }
}
