//! Spectral analysis with FFT

pub mod fft;
pub mod query;
pub mod result;
pub mod analysis;
pub mod multiband;

pub use analysis::{AnalyzerConfig, SingleBandAnalyzer};
pub use multiband::{CompositeResult, MultiBandAnalyzer};
pub use query::{InterpolationMode, Peak, SpectrumQuery};
pub use result::SpectrumResult;
