//! Poisson probability mass functions backed by a precomputed log-gamma table.
//!
//! The table is the only long-lived object in a noncrossing computation: it is built once
//! for a maximal count and then serves every pmf evaluation of that size or smaller.

use crate::math::gamma::{ln_factorial, ln_gamma};

/// `Pr[Poisson(lambda) = k] = e^-lambda * lambda^k / k!`.
#[inline]
pub fn poisson_pmf(lambda: f64, k: usize) -> f64 {
    assert!(lambda >= 0.0, "poisson intensity must be non-negative, got {lambda}");

    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    (-lambda + k as f64 * lambda.ln() - ln_factorial(k)).exp()
}

/// Generator of Poisson pmf arrays over `0..=k` for any `k <= max_k`.
#[derive(Debug, Clone)]
pub struct PoissonPmfGenerator {
    max_k: usize,
    /// `log_gamma[i] = ln(Γ(i))` for `i` in `0..=max_k + 1`.
    log_gamma: Vec<f64>,
    pmf: Vec<f64>,
}

impl PoissonPmfGenerator {
    /// Precomputes the log-gamma table for counts up to `max_k`.
    pub fn new(max_k: usize) -> Self {
        let log_gamma = (0..=max_k + 1).map(|i| ln_gamma(i as f64)).collect();
        Self {
            max_k,
            log_gamma,
            pmf: vec![0.0; max_k + 1],
        }
    }

    /// Largest count this generator can evaluate.
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    /// Evaluates `Pr[Poisson(lambda) = k]` with the cached table.
    #[inline]
    pub fn evaluate_pmf(&self, lambda: f64, k: usize) -> f64 {
        assert!(lambda >= 0.0, "poisson intensity must be non-negative, got {lambda}");
        assert!(k <= self.max_k, "pmf count {k} exceeds table size {}", self.max_k);

        if lambda == 0.0 {
            return if k == 0 { 1.0 } else { 0.0 };
        }
        (-lambda + k as f64 * lambda.ln() - self.log_gamma[k + 1]).exp()
    }

    /// Fills the internal buffer with `Pr[Poisson(lambda) = 0..=k]` and returns it.
    ///
    /// The returned slice (length `k + 1`) is overwritten by the next call.
    pub fn compute_array(&mut self, k: usize, lambda: f64) -> &[f64] {
        assert!(k <= self.max_k, "pmf count {k} exceeds table size {}", self.max_k);
        assert!(lambda >= 0.0, "poisson intensity must be non-negative, got {lambda}");

        let out = &mut self.pmf[..=k];
        if lambda == 0.0 {
            out.fill(0.0);
            out[0] = 1.0;
        } else {
            let log_lambda = lambda.ln();
            for (i, (p, &lg)) in out.iter_mut().zip(&self.log_gamma[1..]).enumerate() {
                *p = (-lambda + i as f64 * log_lambda - lg).exp();
            }
        }
        out
    }
}
