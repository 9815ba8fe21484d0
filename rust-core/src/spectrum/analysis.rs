//! Single-resolution spectrum analyzer
//!
//! Extracts a frame centred on a playback time and runs it through
//! DC removal, Hann windowing, FFT and magnitude extraction.

use super::fft::{forward_fft, hann_window, magnitudes, remove_dc};
use super::query::InterpolationMode;
use super::result::SpectrumResult;
use crate::error::{Result, SpectrumError};
use crate::signal::SampleBuffer;

/// Analysis settings a host drives the engine with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyzerConfig {
    /// Frame length in samples (power of 2), shared by every band
    pub frame_size: usize,

    /// Number of octave bands for multi-band analysis
    pub octave_count: usize,

    /// Interpolation used when reading values between bins
    pub mode: InterpolationMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            frame_size: 256,
            octave_count: 8,
            mode: InterpolationMode::Spline,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn with_octave_count(mut self, octave_count: usize) -> Self {
        self.octave_count = octave_count;
        self
    }

    pub fn with_mode(mut self, mode: InterpolationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check structural constraints before any analysis runs
    pub fn validate(&self) -> Result<()> {
        if !self.frame_size.is_power_of_two() {
            return Err(SpectrumError::InvalidLength {
                len: self.frame_size,
            });
        }
        if self.octave_count == 0 {
            return Err(SpectrumError::InvalidOctaveCount);
        }
        Ok(())
    }
}

/// FFT analysis of one buffer at one resolution
#[derive(Debug, Clone)]
pub struct SingleBandAnalyzer {
    buffer: SampleBuffer,
}

impl SingleBandAnalyzer {
    pub fn new(buffer: SampleBuffer) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn sample_rate(&self) -> f64 {
        self.buffer.sample_rate()
    }

    /// Magnitude spectrum of the frame centred at `time_ms`
    ///
    /// # Arguments
    /// * `time_ms` - Playback time in milliseconds
    /// * `frame_size` - Frame length in samples (power of 2)
    ///
    /// # Returns
    /// A spectrum of `frame_size` bins at this analyzer's sample rate
    pub fn analyse_at(&self, time_ms: f64, frame_size: usize) -> Result<SpectrumResult> {
        if !frame_size.is_power_of_two() {
            return Err(SpectrumError::InvalidLength { len: frame_size });
        }

        let center = self.buffer.time_to_index(time_ms);
        let half = (frame_size / 2) as i64;
        if center.saturating_add(half) <= 0
            || center.saturating_sub(half) >= self.buffer.len() as i64
        {
            log::debug!(
                "Frame at {:.1} ms lies outside the buffer ({:.1} ms long), spectrum is silent",
                time_ms,
                self.buffer.duration_ms()
            );
        }
        log::trace!(
            "Analysing {} samples around index {} at {} Hz",
            frame_size,
            center,
            self.buffer.sample_rate()
        );

        let frame = self.buffer.frame_at(center, frame_size);
        let windowed = hann_window(&remove_dc(&frame)?);
        let (re, im) = forward_fft(&windowed, None)?;

        Ok(SpectrumResult::new(magnitudes(&re, &im)?, self.buffer.sample_rate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::query::SpectrumQuery;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> SampleBuffer {
        let samples: Vec<f64> = (0..len)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
            .collect();
        SampleBuffer::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_config_defaults_validate() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.frame_size, 256);
        assert_eq!(config.octave_count, 8);
        assert_eq!(config.mode, InterpolationMode::Spline);
        assert!(config.validate().is_ok());

        assert_eq!(
            config.clone().with_frame_size(300).validate(),
            Err(SpectrumError::InvalidLength { len: 300 })
        );
        assert_eq!(
            config.with_octave_count(0).validate(),
            Err(SpectrumError::InvalidOctaveCount)
        );
    }

    #[test]
    fn test_rejects_non_power_of_two_frame() {
        let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 1024));
        assert_eq!(
            analyzer.analyse_at(10.0, 1000),
            Err(SpectrumError::InvalidLength { len: 1000 })
        );
        assert!(analyzer.analyse_at(10.0, 0).is_err());
    }

    #[test]
    fn test_result_shape() {
        let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 4096));
        let result = analyzer.analyse_at(20.0, 512).unwrap();
        assert_eq!(result.bin_count(), 512);
        assert_eq!(result.sample_rate(), 44100.0);
        assert!(result.bins().iter().all(|&m| m >= 0.0));
    }

    #[test]
    fn test_peak_near_440() {
        // Centre index 0 puts the tone in the upper half of the frame
        let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 1024));
        let result = analyzer.analyse_at(0.0, 1024).unwrap();
        let peak = result.peak(400.0, 500.0);

        assert!(peak.is_found());
        assert!(peak.value > 0.0);
        assert!((peak.frequency - 440.0).abs() <= result.frequency_resolution());
    }

    #[test]
    fn test_exact_bin_tone_localized() {
        let sample_rate = 8192.0;
        let n = 256;
        // Bin 16 of a 256-point frame at 8192 Hz is 512 Hz
        let analyzer = SingleBandAnalyzer::new(sine(512.0, sample_rate, 4096));
        let result = analyzer.analyse_at(250.0, n).unwrap();

        let (peak_bin, _) = result.bins()[..n / 2]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();
        assert_eq!(peak_bin, 16);
    }

    #[test]
    fn test_silent_outside_buffer() {
        let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 1024));
        let result = analyzer.analyse_at(10_000.0, 256).unwrap();
        assert!(result.bins().iter().all(|&m| m == 0.0));

        let before = analyzer.analyse_at(-1_000.0, 256).unwrap();
        assert!(before.bins().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_extreme_times_are_silent() {
        let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 1024));
        for &time_ms in &[f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e300, f64::NAN] {
            let result = analyzer.analyse_at(time_ms, 256).unwrap();
            assert_eq!(result.bin_count(), 256);
            if time_ms.is_nan() {
                // NaN maps to index 0, which still overlaps the buffer
                assert!(result.bins().iter().all(|m| m.is_finite()));
            } else {
                assert!(result.bins().iter().all(|&m| m == 0.0), "time {}", time_ms);
            }
        }
    }

    #[test]
    fn test_nan_sample_does_not_poison_frame() {
        let mut samples: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 440.0 * n as f64 / 44100.0).sin())
            .collect();
        samples[500] = f64::NAN;
        let analyzer = SingleBandAnalyzer::new(SampleBuffer::new(samples, 44100.0).unwrap());

        let result = analyzer.analyse_at(10.0, 512).unwrap();
        assert!(result.bins().iter().all(|m| m.is_finite()));
        assert!(result.peak(400.0, 500.0).is_found());
    }

    #[test]
    fn test_deterministic() {
        let analyzer = SingleBandAnalyzer::new(sine(1000.0, 48000.0, 8192));
        let a = analyzer.analyse_at(55.5, 1024).unwrap();
        let b = analyzer.analyse_at(55.5, 1024).unwrap();
        assert_eq!(a, b);
    }
}
