//! Continuous-frequency query surface shared by single and composite results

use std::fmt;
use std::str::FromStr;

use crate::error::SpectrumError;

/// How `value` reads between bin centres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum InterpolationMode {
    /// Nearest bin
    Step,
    /// Straight line between the two surrounding bins
    Linear,
    /// Cubic Hermite through the four surrounding bins
    #[default]
    Spline,
}

impl InterpolationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMode::Step => "step",
            InterpolationMode::Linear => "linear",
            InterpolationMode::Spline => "spline",
        }
    }
}

impl fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMode {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "step" => Ok(InterpolationMode::Step),
            "linear" => Ok(InterpolationMode::Linear),
            "spline" => Ok(InterpolationMode::Spline),
            _ => Err(SpectrumError::UnknownMode(s.to_string())),
        }
    }
}

/// Strongest bin in a frequency range
///
/// An empty range yields `value == f64::NEG_INFINITY` with `frequency` set to
/// the lower bound of the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub frequency: f64,
    pub value: f64,
}

impl Peak {
    pub(crate) fn empty(min_freq: f64) -> Self {
        Self {
            frequency: min_freq,
            value: f64::NEG_INFINITY,
        }
    }

    /// False for the empty-range sentinel
    pub fn is_found(&self) -> bool {
        self.value.is_finite()
    }
}

impl From<Peak> for (f64, f64) {
    fn from(peak: Peak) -> Self {
        (peak.frequency, peak.value)
    }
}

/// Queries answered by an analysis result
pub trait SpectrumQuery {
    /// Highest frequency this result can represent (Hz)
    fn max_valid_freq(&self) -> f64;

    /// Magnitude at `freq` (Hz), interpolated according to `mode`
    fn value(&self, freq: f64, mode: InterpolationMode) -> f64;

    /// Strongest bin with frequency in `[min_freq, max_freq)`
    fn peak(&self, min_freq: f64, max_freq: f64) -> Peak;
}
