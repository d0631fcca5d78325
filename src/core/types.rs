use serde::{Deserialize, Serialize};

/// Which side of the corridor a one-sided boundary constrains.
///
/// `Lower` entries are the `b_i` of `b_i <= X_(i)`; `Upper` entries are the `B_i` of
/// `X_(i) <= B_i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundarySide {
    Lower,
    Upper,
}

impl BoundarySide {
    /// Short label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lower => "b_i",
            Self::Upper => "B_i",
        }
    }
}

/// Convolution backend used by the propagators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvolutionMethod {
    /// Triangular O(m^2) sums for every step.
    Direct,
    /// Zero-padded real FFT above the size threshold, direct sums below it.
    #[default]
    Fft,
}

impl ConvolutionMethod {
    pub fn from_use_fft(use_fft: bool) -> Self {
        if use_fft { Self::Fft } else { Self::Direct }
    }
}
