//! Module `mc::simulation`.
//!
//! Path simulation for the empirical CDF of `n` uniforms and for a homogeneous Poisson
//! process on `[0, 1]`, with boundary checks matching the exact propagators.
//!
//! Sorted uniforms are drawn through normalised exponential spacings,
//! `X_(i) = (E_1 + ... + E_i) / (E_1 + ... + E_{n+1})`, so no sort is needed.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::boundaries::{boundaries_cross, normalize_to_sample_size, validate_boundary};
use crate::core::{CrossingError, CrossingResult};

/// Estimated probability with its binomial standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McEstimate {
    pub probability: f64,
    pub std_error: f64,
    pub num_simulations: usize,
}

impl McEstimate {
    fn from_hits(hits: usize, num_simulations: usize) -> Self {
        let n = num_simulations as f64;
        let probability = hits as f64 / n;
        Self {
            probability,
            std_error: (probability * (1.0 - probability) / n).sqrt(),
            num_simulations,
        }
    }
}

/// Single-threaded Monte Carlo engine.
#[derive(Debug, Clone)]
pub struct CrossingMonteCarlo {
    pub num_simulations: usize,
    /// `None` draws a fresh seed from the thread RNG on every run.
    pub seed: Option<u64>,
}

impl CrossingMonteCarlo {
    pub fn new(num_simulations: usize) -> Self {
        Self {
            num_simulations,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random::<u64>());
        StdRng::seed_from_u64(seed)
    }

    fn check_simulations(&self) -> CrossingResult<()> {
        if self.num_simulations == 0 {
            return Err(CrossingError::InvalidInput(
                "num_simulations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Fraction of `n`-sample paths with `lower[i] <= X_(i+1) <= upper[i]` for all `i`.
    pub fn run_ecdf(
        &self,
        n: usize,
        lower: &[f64],
        upper: &[f64],
    ) -> CrossingResult<McEstimate> {
        self.check_simulations()?;
        validate_boundary("lower boundary", lower)?;
        validate_boundary("upper boundary", upper)?;

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("mc_ecdf", n, simulations = self.num_simulations);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let bounds = normalize_to_sample_size(n, lower, upper);
        if boundaries_cross(&bounds.lower, &bounds.upper) {
            return Ok(McEstimate::from_hits(0, self.num_simulations));
        }

        let mut rng = self.rng();
        let mut spacings = vec![0.0_f64; n + 1];
        let hits = (0..self.num_simulations)
            .filter(|_| {
                ecdf_path_survives(&mut rng, &mut spacings, &bounds.lower, &bounds.upper)
            })
            .count();
        Ok(McEstimate::from_hits(hits, self.num_simulations))
    }

    /// Fraction of Poisson paths staying in the corridor; the process is capped at level
    /// `lower.len()` as in the exact propagator.
    pub fn run_poisson(
        &self,
        intensity: f64,
        lower: &[f64],
        upper: &[f64],
    ) -> CrossingResult<McEstimate> {
        self.check_simulations()?;
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(CrossingError::InvalidInput(format!(
                "intensity must be finite and non-negative, got {intensity}"
            )));
        }
        validate_boundary("lower boundary", lower)?;
        validate_boundary("upper boundary", upper)?;

        #[cfg(feature = "tracing")]
        let span =
            tracing::info_span!("mc_poisson", intensity, simulations = self.num_simulations);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut rng = self.rng();
        let hits = (0..self.num_simulations)
            .filter(|_| poisson_path_survives(&mut rng, intensity, lower, upper))
            .count();
        Ok(McEstimate::from_hits(hits, self.num_simulations))
    }
}

#[inline]
fn sample_exponential<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - u lies in (0, 1], so the logarithm is finite.
    -(1.0 - rng.random::<f64>()).ln()
}

fn ecdf_path_survives<R: Rng + ?Sized>(
    rng: &mut R,
    spacings: &mut [f64],
    lower: &[f64],
    upper: &[f64],
) -> bool {
    for s in spacings.iter_mut() {
        *s = sample_exponential(rng);
    }
    let total: f64 = spacings.iter().sum();

    let mut cumulative = 0.0;
    for ((s, &b), &big_b) in spacings.iter().zip(lower).zip(upper) {
        cumulative += s;
        let x = cumulative / total;
        if x < b || x > big_b {
            return false;
        }
    }
    true
}

fn poisson_path_survives<R: Rng + ?Sized>(
    rng: &mut R,
    intensity: f64,
    lower: &[f64],
    upper: &[f64],
) -> bool {
    let cap = lower.len();
    let mut arrival = 0.0;
    let mut i = 0;
    loop {
        arrival = if intensity > 0.0 {
            arrival + sample_exponential(rng) / intensity
        } else {
            f64::INFINITY
        };
        // `arrival` is the (i+1)-th arrival time.
        if arrival > 1.0 {
            return i >= upper.len();
        }
        let above_upper = upper.get(i).is_some_and(|&big_b| arrival > big_b);
        if i >= cap || arrival < lower[i] || above_upper {
            return false;
        }
        i += 1;
    }
}

/// Monte Carlo counterpart of the two-sided empirical-CDF probability.
pub fn ecdf_noncrossing_probability_mc(
    n: usize,
    lower: &[f64],
    upper: &[f64],
    num_simulations: usize,
    seed: Option<u64>,
) -> CrossingResult<McEstimate> {
    CrossingMonteCarlo {
        num_simulations,
        seed,
    }
    .run_ecdf(n, lower, upper)
}

/// Monte Carlo counterpart of the Poisson-process probability.
pub fn poisson_noncrossing_probability_mc(
    intensity: f64,
    lower: &[f64],
    upper: &[f64],
    num_simulations: usize,
    seed: Option<u64>,
) -> CrossingResult<McEstimate> {
    CrossingMonteCarlo {
        num_simulations,
        seed,
    }
    .run_poisson(intensity, lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_estimate() {
        let engine = CrossingMonteCarlo::new(2_000).with_seed(42);
        let a = engine.run_ecdf(5, &[0.0, 0.1], &[0.6, 0.8]).unwrap();
        let b = engine.run_ecdf(5, &[0.0, 0.1], &[0.6, 0.8]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.num_simulations, 2_000);
    }

    #[test]
    fn single_sample_interval_within_three_stderr() {
        let estimate =
            ecdf_noncrossing_probability_mc(1, &[0.2], &[0.7], 50_000, Some(7)).unwrap();
        assert!((estimate.probability - 0.5).abs() <= 3.0 * estimate.std_error);
    }

    #[test]
    fn zero_intensity_survives_only_without_upper_steps() {
        let free = poisson_noncrossing_probability_mc(0.0, &[0.5], &[], 100, Some(1)).unwrap();
        assert_eq!(free.probability, 1.0);
        assert_eq!(free.std_error, 0.0);

        let forced =
            poisson_noncrossing_probability_mc(0.0, &[0.5], &[0.9], 100, Some(1)).unwrap();
        assert_eq!(forced.probability, 0.0);
    }

    #[test]
    fn crossing_boundaries_never_survive() {
        let estimate = ecdf_noncrossing_probability_mc(2, &[0.6], &[0.5], 100, Some(3)).unwrap();
        assert_eq!(estimate.probability, 0.0);
    }

    #[test]
    fn zero_simulations_rejected() {
        assert!(matches!(
            ecdf_noncrossing_probability_mc(3, &[], &[], 0, Some(1)),
            Err(CrossingError::InvalidInput(_))
        ));
    }
}
