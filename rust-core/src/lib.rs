//! Octave Spectrum - Multi-Resolution Spectral Analysis Core
//! 
//! Computes FFT magnitude spectra of a decoded audio buffer at several
//! octave-spaced resolutions and answers continuous-frequency queries
//! (interpolated values and ranged peaks) over them.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod signal;
pub mod spectrum;
pub mod tonal;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectrumError};
pub use signal::SampleBuffer;
pub use spectrum::{
    AnalyzerConfig, CompositeResult, InterpolationMode, MultiBandAnalyzer, Peak,
    SingleBandAnalyzer, SpectrumQuery, SpectrumResult,
};
