//! Long-lived state shared by propagations of equal or smaller size.

use crate::core::CrossingOptions;
use crate::engines::fft::ConvolutionEngine;
use crate::math::poisson::PoissonPmfGenerator;

/// Log-gamma table plus convolution engine (scratch buffers and FFT plans).
///
/// `capacity` is the largest state length, i.e. `n + 1` for `n` samples. A workspace can be
/// reused for any later problem that fits; [`PropagationWorkspace::ensure_capacity`] grows it.
#[derive(Debug)]
pub struct PropagationWorkspace {
    pub(crate) pmf: PoissonPmfGenerator,
    pub(crate) convolver: ConvolutionEngine,
    options: CrossingOptions,
}

impl PropagationWorkspace {
    pub fn new(capacity: usize, options: &CrossingOptions) -> Self {
        let capacity = capacity.max(1);
        Self {
            pmf: PoissonPmfGenerator::new(capacity - 1),
            convolver: ConvolutionEngine::with_options(capacity, options),
            options: *options,
        }
    }

    /// Largest state length this workspace can propagate.
    pub fn capacity(&self) -> usize {
        self.convolver.max_input_size()
    }

    pub fn options(&self) -> &CrossingOptions {
        &self.options
    }

    /// Rebuilds the tables if `capacity` exceeds the current one. Smaller requests keep
    /// the cached plans.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            let options = self.options;
            *self = Self::new(capacity, &options);
        }
    }
}
