use crate::blocks::NuFormulation;
use crate::error::{Result, TransportError};
use crate::random::Random;

// Sample the integer number of neutrons released by a fission event at
// `energy`, from a (generally fractional) <nu> formulation: the floor
// is certain, and one more neutron is released with probability equal
// to the fractional remainder. This is the standard discretization
// used throughout MC transport codes to turn a continuous yield curve
// into an integer number of fission progeny per history.
pub fn sample_nu(formulation: &NuFormulation, energy: f64, rng: &mut Random) -> Result<usize> {
    let nu = formulation.evaluate(energy).map_err(|e| TransportError::domain(e.to_string()))?;
    let nu = TransportError::check_finite(nu, "nu")?;
    if nu < 0.0 {
        return Err(TransportError::domain(format!("negative nu at E={energy}: {nu}")));
    }

    let base = nu.floor();
    let fraction = nu - base;
    let extra = usize::from(rng.uniform() < fraction);
    Ok(base as usize + extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PolynomialNu;

    #[test]
    fn test_integer_nu_is_always_that_integer() {
        let formulation = NuFormulation::Polynomial(PolynomialNu { coefficients: vec![2.0] });
        let mut rng = Random::seed(1);
        for _ in 0..100 {
            assert_eq!(sample_nu(&formulation, 1.0, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_fractional_nu_averages_to_nu() {
        let formulation = NuFormulation::Polynomial(PolynomialNu { coefficients: vec![2.5] });
        let mut rng = Random::seed(7);
        let n = 20_000;
        let total: usize = (0..n).map(|_| sample_nu(&formulation, 1.0, &mut rng).unwrap()).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 2.5).abs() < 0.05);
    }

    #[test]
    fn test_negative_nu_is_rejected() {
        let formulation = NuFormulation::Polynomial(PolynomialNu { coefficients: vec![-1.0] });
        let mut rng = Random::seed(1);
        assert!(sample_nu(&formulation, 1.0, &mut rng).is_err());
    }
}
