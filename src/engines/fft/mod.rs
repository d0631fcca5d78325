//! Module `engines::fft`.
//!
//! Implements the hybrid direct/FFT causal convolution used by every propagation step.
//!
//! References: Moscovich and Nadler (2017), "Fast calculation of boundary crossing probabilities for Poisson processes", Sec. 3.
//!
//! Primary API surface: `ConvolutionEngine` and `convolve_same_size_direct`.
//!
//! Numerical considerations: FFT round-off is absolute, not relative; probabilities far below `1e-15` of the corridor mass are not resolved on the FFT path.
//!
//! When to use: FFT above ~80 live levels; the direct sum for narrow corridors or when bit-level reproducibility across sizes matters.

mod fft_core;

pub mod convolver;

pub use convolver::{ConvolutionEngine, convolve_same_size_direct};
