//! crossprob computes exact probabilities that a counting process stays between two
//! monotone step boundaries on `[0, 1]`: the empirical distribution function of `n` uniform
//! samples, or a homogeneous Poisson process of arbitrary intensity.
//!
//! The exact engines propagate the distribution of the process level from one boundary step
//! to the next, one Poisson-kernel convolution per step, switching between direct sums and
//! zero-padded real FFTs by size. Monte Carlo estimators are provided as an independent
//! cross-check.
//!
//! References used across modules include:
//! - Moscovich and Nadler (2017), *Fast calculation of boundary crossing probabilities for
//!   Poisson processes*, Statistics and Probability Letters 123.
//! - Moscovich, Nadler and Spiegelman (2016) for the goodness-of-fit applications.
//! - Birnbaum and Tingey (1951) for the one-sided Kolmogorov-Smirnov closed form used in tests.
//!
//! Numerical considerations:
//! - All arithmetic is `f64`. Results lie in `[0, 1]` up to rounding; the FFT path carries
//!   absolute errors around `1e-15` of the surviving mass.
//! - Exact `0.0` (crossing boundaries) and `1.0` (no constraint, `n = 0`) are valid answers.
//!
//! # Feature Flags
//! - `tracing`: emits spans around each propagation and debug events for blocks and FFT plans.
//!
//! # Quick Start
//! A single uniform sample must land in `[0.2, 0.7]`:
//! ```rust
//! use crossprob::engines::compute_two_sided_noncrossing_probability;
//!
//! let p = compute_two_sided_noncrossing_probability(1, &[0.2], &[0.7], true).unwrap();
//! assert!((p - 0.5).abs() < 1.0e-12);
//! ```
//!
//! One-sided Kolmogorov-Smirnov acceptance probability `Pr[D+_10 <= 0.3]`:
//! ```rust
//! use crossprob::core::BoundarySide;
//! use crossprob::engines::compute_one_sided_noncrossing_probability;
//!
//! let n = 10;
//! let d = 0.3;
//! let upper: Vec<f64> = (0..n).map(|i| (i as f64 / n as f64 + d).min(1.0)).collect();
//! let p = compute_one_sided_noncrossing_probability(n, &upper, BoundarySide::Upper, None)
//!     .unwrap();
//! assert!((p - 0.864_536_444_4).abs() < 1.0e-8);
//! ```
//!
//! Poisson process of intensity 2 with no arrival before `t = 0.5` and at most one overall:
//! ```rust
//! use crossprob::core::ConvolutionMethod;
//! use crossprob::engines::poisson_process_noncrossing_probability;
//!
//! let p = poisson_process_noncrossing_probability(2.0, &[0.5], &[], ConvolutionMethod::Fft, None)
//!     .unwrap();
//! assert!((p - 2.0 * (-2.0_f64).exp()).abs() < 1.0e-14);
//! ```
//!
//! Reuse one workspace across many queries:
//! ```rust
//! use crossprob::core::CrossingOptions;
//! use crossprob::engines::{PropagationWorkspace, TwoSidedPropagator};
//!
//! let mut workspace = PropagationWorkspace::new(64, &CrossingOptions::default());
//! let mut propagator = TwoSidedPropagator::new(&mut workspace);
//! let loose = propagator.ecdf_noncrossing_probability(20, &[], &[]).unwrap();
//! let tight = propagator.ecdf_noncrossing_probability(20, &[0.01], &[0.9]).unwrap();
//! assert!((loose - 1.0).abs() < 1.0e-9);
//! assert!(tight < loose);
//! ```

pub mod boundaries;
pub mod core;
pub mod engines;
pub mod math;
pub mod mc;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::boundaries::{BoundaryPair, read_boundaries_file, validate_boundary};
    pub use crate::core::*;
    pub use crate::engines::{
        BlockJumpPropagator, PropagationWorkspace, TwoSidedPropagator,
        compute_one_sided_noncrossing_probability, compute_two_sided_noncrossing_probability,
        poisson_process_noncrossing_probability,
    };
    pub use crate::mc::{McEstimate, ecdf_noncrossing_probability_mc};
}
