//! Error types for the analysis core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("FFT length must be a non-zero power of two (got {len})")]
    InvalidLength { len: usize },

    #[error("Real and imaginary parts differ in length ({re} vs {im})")]
    LengthMismatch { re: usize, im: usize },

    #[error("Input signal is empty")]
    EmptyInput,

    #[error("Sample rate must be finite and positive (got {0} Hz)")]
    InvalidSampleRate(f64),

    #[error("Octave count must be at least 1")]
    InvalidOctaveCount,

    #[error("Unknown interpolation mode: {0}")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, SpectrumError>;
