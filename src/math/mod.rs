//! Numerical building blocks: log-gamma, Poisson pmfs, and reusable buffers.

pub mod arena;
pub mod gamma;
pub mod poisson;

pub use arena::DoubleBuffer;
pub use gamma::{ln_factorial, ln_gamma};
pub use poisson::{PoissonPmfGenerator, poisson_pmf};
