//! Module `engines::fft::convolver`.
//!
//! Causal ("same size") convolution of two non-negative sequences:
//! `out[j] = sum_{k=0..=j} a[k] * b[j-k]` for `j < size`.
//!
//! Numerical considerations: below `fft_threshold` the O(m^2) triangular sum is both faster
//! and exact to rounding; above it both inputs are zero-padded to at least `2 * size` so the
//! cyclic FFT convolution carries no wraparound into the first `size` outputs. FFT results
//! carry absolute errors of order `eps * max|a| * max|b| * size`, so tiny outputs may come
//! back slightly negative.

use num_complex::Complex;

use super::fft_core::{RealFftPlanCache, forward_real, inverse_real};
use crate::core::{
    ConvolutionMethod, CrossingOptions, CrossingResult, DEFAULT_FFT_ROUNDING,
    DEFAULT_FFT_THRESHOLD,
};

/// Direct triangular convolution of the first `size` elements.
pub fn convolve_same_size_direct(size: usize, a: &[f64], b: &[f64], out: &mut [f64]) {
    let (a, b) = (&a[..size], &b[..size]);
    for (j, slot) in out[..size].iter_mut().enumerate() {
        *slot = a[..=j]
            .iter()
            .zip(b[..=j].iter().rev())
            .map(|(x, y)| x * y)
            .sum();
    }
}

/// Hybrid direct/FFT convolution engine with owned scratch buffers and a plan cache.
///
/// Scratch is sized once for `max_input_size`; larger requests are a caller bug and panic.
#[derive(Debug)]
pub struct ConvolutionEngine {
    method: ConvolutionMethod,
    max_input_size: usize,
    fft_threshold: usize,
    rounding: usize,
    plans: RealFftPlanCache,
    padded_a: Vec<f64>,
    padded_b: Vec<f64>,
    spectrum_a: Vec<Complex<f64>>,
    spectrum_b: Vec<Complex<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl ConvolutionEngine {
    /// Engine for inputs up to `max_input_size` with default threshold and rounding.
    pub fn new(max_input_size: usize, method: ConvolutionMethod) -> Self {
        Self::with_params(
            max_input_size,
            method,
            DEFAULT_FFT_THRESHOLD,
            DEFAULT_FFT_ROUNDING,
        )
    }

    pub fn with_options(max_input_size: usize, options: &CrossingOptions) -> Self {
        Self::with_params(
            max_input_size,
            options.convolution,
            options.fft_threshold,
            options.fft_rounding,
        )
    }

    fn with_params(
        max_input_size: usize,
        method: ConvolutionMethod,
        fft_threshold: usize,
        rounding: usize,
    ) -> Self {
        assert!(rounding > 0, "fft rounding must be positive");

        let max_padded = match method {
            ConvolutionMethod::Direct => 0,
            ConvolutionMethod::Fft => padded_length(max_input_size, rounding),
        };
        let zero = Complex::new(0.0, 0.0);
        Self {
            method,
            max_input_size,
            fft_threshold,
            rounding,
            plans: RealFftPlanCache::new(),
            padded_a: vec![0.0; max_padded],
            padded_b: vec![0.0; max_padded],
            spectrum_a: vec![zero; max_padded / 2 + 1],
            spectrum_b: vec![zero; max_padded / 2 + 1],
            scratch: Vec::new(),
        }
    }

    pub fn method(&self) -> ConvolutionMethod {
        self.method
    }

    pub fn max_input_size(&self) -> usize {
        self.max_input_size
    }

    /// Number of distinct padded lengths planned so far.
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    /// Padded transform length used for an input of `size` elements.
    pub fn padded_length(&self, size: usize) -> usize {
        padded_length(size, self.rounding)
    }

    /// Writes the causal convolution of `a[..size]` and `b[..size]` into `out[..size]`.
    pub fn convolve_same_size(
        &mut self,
        size: usize,
        a: &[f64],
        b: &[f64],
        out: &mut [f64],
    ) -> CrossingResult<()> {
        assert!(
            size <= self.max_input_size,
            "convolution size {size} exceeds engine maximum {}",
            self.max_input_size
        );
        assert!(
            a.len() >= size && b.len() >= size && out.len() >= size,
            "convolution buffers shorter than size {size}"
        );

        if size == 0 {
            return Ok(());
        }
        if self.method == ConvolutionMethod::Direct || size < self.fft_threshold {
            convolve_same_size_direct(size, a, b, out);
            return Ok(());
        }
        self.convolve_fft(size, a, b, out)
    }

    fn convolve_fft(
        &mut self,
        size: usize,
        a: &[f64],
        b: &[f64],
        out: &mut [f64],
    ) -> CrossingResult<()> {
        let len = self.padded_length(size);
        let half = len / 2 + 1;
        let plan = self.plans.plan(len);

        let scratch_len = plan.scratch_len();
        if self.scratch.len() < scratch_len {
            self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        }

        let padded_a = &mut self.padded_a[..len];
        padded_a[..size].copy_from_slice(&a[..size]);
        padded_a[size..].fill(0.0);
        let padded_b = &mut self.padded_b[..len];
        padded_b[..size].copy_from_slice(&b[..size]);
        padded_b[size..].fill(0.0);

        let spectrum_a = &mut self.spectrum_a[..half];
        let spectrum_b = &mut self.spectrum_b[..half];
        forward_real(&plan, padded_a, spectrum_a, &mut self.scratch)?;
        forward_real(&plan, padded_b, spectrum_b, &mut self.scratch)?;

        // The backend is unnormalized; fold 1/len into the pointwise product.
        let scale = 1.0 / len as f64;
        for (x, y) in spectrum_a.iter_mut().zip(spectrum_b.iter()) {
            *x = *x * *y * scale;
        }

        inverse_real(&plan, spectrum_a, padded_b, &mut self.scratch)?;
        out[..size].copy_from_slice(&padded_b[..size]);
        Ok(())
    }
}

#[inline]
fn padded_length(size: usize, rounding: usize) -> usize {
    (2 * size).div_ceil(rounding) * rounding
}
