use std::collections::HashMap;
use std::sync::Arc;

use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};

use crate::core::{CrossingError, CrossingResult};

/// Forward/inverse real FFT pair for one transform length.
#[derive(Clone)]
pub(crate) struct RealFftPlan {
    pub(crate) forward: Arc<dyn RealToComplex<f64>>,
    pub(crate) inverse: Arc<dyn ComplexToReal<f64>>,
}

impl RealFftPlan {
    /// Scratch length large enough for both directions.
    pub(crate) fn scratch_len(&self) -> usize {
        self.forward
            .get_scratch_len()
            .max(self.inverse.get_scratch_len())
    }
}

/// Lazily built plans keyed by padded transform length.
///
/// Plan construction dominates the one-time cost of a transform, so every length is
/// planned once and reused for the lifetime of the owning engine.
pub(crate) struct RealFftPlanCache {
    planner: RealFftPlanner<f64>,
    plans: HashMap<usize, RealFftPlan>,
}

impl RealFftPlanCache {
    pub(crate) fn new() -> Self {
        Self {
            planner: RealFftPlanner::<f64>::new(),
            plans: HashMap::new(),
        }
    }

    pub(crate) fn plan(&mut self, n: usize) -> RealFftPlan {
        if let Some(plan) = self.plans.get(&n) {
            return plan.clone();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(padded_len = n, "planning real FFT");

        let plan = RealFftPlan {
            forward: self.planner.plan_fft_forward(n),
            inverse: self.planner.plan_fft_inverse(n),
        };
        self.plans.insert(n, plan.clone());
        plan
    }

    pub(crate) fn len(&self) -> usize {
        self.plans.len()
    }
}

impl std::fmt::Debug for RealFftPlanCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lengths: Vec<_> = self.plans.keys().copied().collect();
        lengths.sort_unstable();
        f.debug_struct("RealFftPlanCache")
            .field("lengths", &lengths)
            .finish()
    }
}

/// Real-to-complex transform of `input` into the half spectrum `output`.
pub(crate) fn forward_real(
    plan: &RealFftPlan,
    input: &mut [f64],
    output: &mut [Complex<f64>],
    scratch: &mut [Complex<f64>],
) -> CrossingResult<()> {
    let scratch_len = plan.forward.get_scratch_len();
    plan.forward
        .process_with_scratch(input, output, &mut scratch[..scratch_len])
        .map_err(|err| CrossingError::NumericalError(err.to_string()))
}

/// Complex-to-real inverse of a half spectrum. The output is unnormalized.
pub(crate) fn inverse_real(
    plan: &RealFftPlan,
    input: &mut [Complex<f64>],
    output: &mut [f64],
    scratch: &mut [Complex<f64>],
) -> CrossingResult<()> {
    // The DC and Nyquist bins of a real signal's spectrum are real; rounding in the
    // product may leave a residue that the backend rejects.
    if let Some(first) = input.first_mut() {
        first.im = 0.0;
    }
    if output.len() % 2 == 0 {
        if let Some(last) = input.last_mut() {
            last.im = 0.0;
        }
    }
    let scratch_len = plan.inverse.get_scratch_len();
    plan.inverse
        .process_with_scratch(input, output, &mut scratch[..scratch_len])
        .map_err(|err| CrossingError::NumericalError(err.to_string()))
}
