//! Decoded sample buffers and octave downsampling
//!
//! A `SampleBuffer` is immutable once built. Clones share the same sample
//! storage, so handing one buffer to several analyzers costs no copy.

use crate::error::{Result, SpectrumError};
use std::sync::Arc;

/// Mono samples (nominally in [-1, 1]) plus their sample rate
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Arc<[f64]>,
    sample_rate: f64,
}

impl SampleBuffer {
    /// Create a buffer
    ///
    /// # Arguments
    /// * `samples` - Decoded samples
    /// * `sample_rate` - Sample rate in Hz (finite, > 0)
    pub fn new(samples: impl Into<Arc<[f64]>>, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SpectrumError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples: samples.into(),
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the buffer in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.samples.len() as f64 * 1000.0 / self.sample_rate
    }

    /// Bounds-checked read; anything outside the buffer, or non-finite, is 0
    pub fn sample(&self, index: i64) -> f64 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.samples.get(i))
            .copied()
            .filter(|x| x.is_finite())
            .unwrap_or(0.0)
    }

    /// Sample index covering playback time `time_ms`
    ///
    /// Sample `i` stands for the interval `[i, i + 1)`, so the index is
    /// floored rather than rounded. This keeps indices aligned across
    /// downsampled levels.
    pub fn time_to_index(&self, time_ms: f64) -> i64 {
        (time_ms * self.sample_rate / 1000.0).floor() as i64
    }

    /// Extract `size` samples covering `[center - size/2, center + size/2)`
    ///
    /// Positions outside the buffer are zero-filled.
    pub fn frame_at(&self, center: i64, size: usize) -> Vec<f64> {
        let start = center.saturating_sub((size / 2) as i64);
        (0..size as i64)
            .map(|i| self.sample(start.saturating_add(i)))
            .collect()
    }

    /// Next octave level: pairwise mean of adjacent samples at half the rate
    ///
    /// A trailing odd sample is dropped.
    pub fn downsample(&self) -> SampleBuffer {
        let samples: Vec<f64> = self
            .samples
            .chunks_exact(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect();

        Self {
            samples: samples.into(),
            sample_rate: self.sample_rate / 2.0,
        }
    }
}
