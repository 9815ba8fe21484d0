//! Octave-cascaded multi-resolution analysis
//!
//! Band `k` analyses the buffer downsampled `k` times, so its Nyquist is
//! `band[0].max_valid_freq / 2^k`. Every band uses the same frame length in
//! samples, which makes coarser bands cover a longer stretch of time with
//! finer resolution in Hz.

use super::analysis::{AnalyzerConfig, SingleBandAnalyzer};
use super::query::{InterpolationMode, Peak, SpectrumQuery};
use super::result::SpectrumResult;
use crate::error::{Result, SpectrumError};
use crate::signal::SampleBuffer;

/// Chain of single-band analyzers over successively halved buffers
#[derive(Debug, Clone)]
pub struct MultiBandAnalyzer {
    bands: Vec<SingleBandAnalyzer>,
}

impl MultiBandAnalyzer {
    /// Build the band chain
    ///
    /// # Arguments
    /// * `buffer` - Full-rate buffer, shared with band 0
    /// * `octave_count` - Number of bands (>= 1)
    pub fn new(buffer: SampleBuffer, octave_count: usize) -> Result<Self> {
        if octave_count == 0 {
            return Err(SpectrumError::InvalidOctaveCount);
        }

        let mut bands = Vec::with_capacity(octave_count);
        let mut level = buffer;
        for k in 0..octave_count {
            log::debug!(
                "Band {}: {} samples at {} Hz (Nyquist {} Hz)",
                k,
                level.len(),
                level.sample_rate(),
                level.sample_rate() / 2.0
            );
            let next = level.downsample();
            bands.push(SingleBandAnalyzer::new(std::mem::replace(&mut level, next)));
        }

        Ok(Self { bands })
    }

    pub fn from_config(buffer: SampleBuffer, config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Self::new(buffer, config.octave_count)
    }

    pub fn bands(&self) -> &[SingleBandAnalyzer] {
        &self.bands
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Analyse every band at `time_ms` with the same frame length
    pub fn analyse_at(&self, time_ms: f64, frame_size: usize) -> Result<CompositeResult> {
        let bands = self
            .bands
            .iter()
            .map(|band| band.analyse_at(time_ms, frame_size))
            .collect::<Result<Vec<_>>>()?;

        Ok(CompositeResult::new(bands))
    }

    /// `analyse_at` with the frame length taken from `config`
    pub fn analyse_with(&self, time_ms: f64, config: &AnalyzerConfig) -> Result<CompositeResult> {
        self.analyse_at(time_ms, config.frame_size)
    }
}

/// Per-band spectra of one analysis time, ordered fine to coarse
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResult {
    bands: Vec<SpectrumResult>,
}

impl CompositeResult {
    pub(crate) fn new(bands: Vec<SpectrumResult>) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &[SpectrumResult] {
        &self.bands
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Index of the band that answers queries bounded by `freq`
    ///
    /// Walks from band 0 and moves on while the next band's Nyquist still
    /// exceeds `freq`. Ends on the last band otherwise.
    pub fn band_for(&self, freq: f64) -> usize {
        let mut i = 0;
        while i + 1 < self.bands.len() && freq < self.bands[i + 1].max_valid_freq() {
            i += 1;
        }
        i
    }
}

impl SpectrumQuery for CompositeResult {
    fn max_valid_freq(&self) -> f64 {
        self.bands
            .first()
            .map(|band| band.max_valid_freq())
            .unwrap_or(0.0)
    }

    fn value(&self, freq: f64, mode: InterpolationMode) -> f64 {
        match self.bands.get(self.band_for(freq)) {
            Some(band) => band.value(freq, mode),
            None => 0.0,
        }
    }

    fn peak(&self, min_freq: f64, max_freq: f64) -> Peak {
        match self.bands.get(self.band_for(max_freq)) {
            Some(band) => band.peak(min_freq, max_freq),
            None => Peak::empty(min_freq),
        }
    }
}
