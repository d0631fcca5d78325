//! Module `mc`.
//!
//! Monte Carlo estimators of noncrossing probabilities, used as an independent cross-check
//! of the exact propagators.
//!
//! Numerical considerations: the standard error is `sqrt(p (1 - p) / N)`; a few hundred
//! thousand paths resolve probabilities to about three decimals.

pub mod simulation;

pub use simulation::{
    CrossingMonteCarlo, McEstimate, ecdf_noncrossing_probability_mc,
    poisson_noncrossing_probability_mc,
};
