//! Core error types, shared enums, and configuration used by every engine.

pub mod options;
pub mod types;

pub use options::*;
pub use types::*;

/// Library-wide result alias.
pub type CrossingResult<T> = Result<T, CrossingError>;

/// Errors surfaced by the public API.
///
/// Internal invariant breaks (negative Poisson intensities, oversized convolutions) are
/// assertions, not variants of this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossingError {
    /// Boundary values that are not finite, leave `[0, 1]`, or decrease.
    InvalidBoundary(String),
    /// Scalar argument outside its domain (sample size, intensity, block size, ...).
    InvalidInput(String),
    /// Malformed boundary file or configuration payload.
    Parse(String),
    /// Failure reading an input file.
    Io(String),
    /// Numerical issue reported by a transform backend.
    NumericalError(String),
}

impl std::fmt::Display for CrossingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBoundary(msg) => write!(f, "invalid boundary: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Io(msg) => write!(f, "i/o error: {msg}"),
            Self::NumericalError(msg) => write!(f, "numerical error: {msg}"),
        }
    }
}

impl std::error::Error for CrossingError {}

impl From<std::io::Error> for CrossingError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CrossingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
