//! Engine configuration and its JSON form.
//!
//! # Examples
//! ```rust
//! use crossprob::core::{from_json, to_json_pretty, ConvolutionMethod, CrossingOptions};
//!
//! let options = CrossingOptions {
//!     convolution: ConvolutionMethod::Direct,
//!     block_size: Some(12),
//!     ..CrossingOptions::default()
//! };
//!
//! let json = to_json_pretty(&options).expect("json serialization");
//! let decoded: CrossingOptions = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, options);
//!
//! // Missing fields fall back to defaults.
//! let partial: CrossingOptions = from_json(r#"{ "fft_threshold": 64 }"#).unwrap();
//! assert_eq!(partial.fft_threshold, 64);
//! assert_eq!(partial.convolution, ConvolutionMethod::Fft);
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{ConvolutionMethod, CrossingError, CrossingResult};

/// Below this input length the direct triangular sum beats FFT setup overhead.
pub const DEFAULT_FFT_THRESHOLD: usize = 80;

/// Padded FFT lengths are rounded up to a multiple of this, bounding the number of plans.
pub const DEFAULT_FFT_ROUNDING: usize = 128;

/// Tunables shared by the propagators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingOptions {
    /// Convolution backend.
    pub convolution: ConvolutionMethod,
    /// Smallest input length convolved through the FFT path.
    pub fft_threshold: usize,
    /// Padded FFT length granularity.
    pub fft_rounding: usize,
    /// Block size for the one-sided block-jump propagator; `None` picks `sqrt(n) + 1`.
    pub block_size: Option<usize>,
}

impl Default for CrossingOptions {
    fn default() -> Self {
        Self {
            convolution: ConvolutionMethod::Fft,
            fft_threshold: DEFAULT_FFT_THRESHOLD,
            fft_rounding: DEFAULT_FFT_ROUNDING,
            block_size: None,
        }
    }
}

impl CrossingOptions {
    /// Default options with the given convolution backend.
    pub fn with_method(convolution: ConvolutionMethod) -> Self {
        Self {
            convolution,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CrossingResult<()> {
        if self.fft_rounding == 0 {
            return Err(CrossingError::InvalidInput(
                "fft_rounding must be > 0".to_string(),
            ));
        }
        if self.block_size == Some(0) {
            return Err(CrossingError::InvalidInput(
                "block_size must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CrossingResult<Self> {
        let payload = std::fs::read_to_string(path)?;
        let options: Self = from_json(&payload)?;
        options.validate()?;
        Ok(options)
    }
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}
