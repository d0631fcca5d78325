//! Module `boundaries`.
//!
//! Boundary validation, sample-size normalisation, and the two-line boundary file format.
//!
//! A boundary is a non-decreasing sequence of integer crossing times in `[0, 1]`. For `n`
//! samples the lower boundary `b_1..b_n` requires `X_(i) >= b_i` and the upper boundary
//! `B_1..B_n` requires `X_(i) <= B_i`.

pub mod file;

pub use file::{parse_boundaries, read_boundaries_file};

use crate::core::{CrossingError, CrossingResult};

/// A lower/upper boundary pair as read from a file or built by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryPair {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BoundaryPair {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper }
    }

    pub fn validate(&self) -> CrossingResult<()> {
        validate_boundary("lower boundary", &self.lower)?;
        validate_boundary("upper boundary", &self.upper)
    }

    /// See [`boundaries_cross`].
    pub fn crosses(&self) -> bool {
        boundaries_cross(&self.lower, &self.upper)
    }

    /// See [`normalize_to_sample_size`].
    pub fn normalized(&self, n: usize) -> Self {
        normalize_to_sample_size(n, &self.lower, &self.upper)
    }
}

/// Checks that every value is finite, lies in `[0, 1]`, and that the sequence never decreases.
pub fn validate_boundary(name: &str, values: &[f64]) -> CrossingResult<()> {
    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(CrossingError::InvalidBoundary(format!(
                "{name}[{i}] is not finite ({value})"
            )));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(CrossingError::InvalidBoundary(format!(
                "{name}[{i}] = {value} is outside [0, 1]"
            )));
        }
    }
    if let Some(i) = values.windows(2).position(|w| w[1] < w[0]) {
        return Err(CrossingError::InvalidBoundary(format!(
            "{name} must be non-decreasing, but {name}[{}] = {} < {name}[{i}] = {}",
            i + 1,
            values[i + 1],
            values[i]
        )));
    }
    Ok(())
}

/// Whether the corridor is empty at some level.
///
/// Either the floor would overtake the ceiling (`upper` has more steps than `lower`), or
/// some `b_i > B_i` makes the `i`-th order statistic infeasible.
pub fn boundaries_cross(lower: &[f64], upper: &[f64]) -> bool {
    upper.len() > lower.len() || lower.iter().zip(upper).any(|(b, big_b)| b > big_b)
}

/// Truncates both boundaries to `n` entries and pads the missing ones with "no constraint"
/// values (`0` for the lower, `1` for the upper boundary).
pub fn normalize_to_sample_size(n: usize, lower: &[f64], upper: &[f64]) -> BoundaryPair {
    BoundaryPair {
        lower: padded(n, lower, 0.0),
        upper: padded(n, upper, 1.0),
    }
}

fn padded(n: usize, values: &[f64], fill: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(&values[..values.len().min(n)]);
    out.resize(n, fill);
    out
}
