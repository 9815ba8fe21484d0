//! Magnitude spectrum with frequency-domain lookup

use super::query::{InterpolationMode, Peak, SpectrumQuery};

/// One magnitude spectrum and the rate it was sampled at
///
/// Immutable once built. Bin `i` sits at `i * frequency_resolution()` Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumResult {
    bins: Vec<f64>,
    sample_rate: f64,
}

impl SpectrumResult {
    pub fn new(bins: Vec<f64>, sample_rate: f64) -> Self {
        Self { bins, sample_rate }
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Spacing between bins in Hz
    pub fn frequency_resolution(&self) -> f64 {
        self.sample_rate / self.bins.len() as f64
    }

    /// Fractional bin index of `freq`
    pub fn freq_to_index(&self, freq: f64) -> f64 {
        freq / self.frequency_resolution()
    }

    pub fn index_to_freq(&self, index: f64) -> f64 {
        index * self.frequency_resolution()
    }

    /// Bin magnitude, 0 for any index outside `[0, bin_count)`
    pub fn bin(&self, index: i64) -> f64 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.bins.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    fn step(&self, index: f64) -> f64 {
        // Ties round up
        self.bin((index + 0.5).floor() as i64)
    }

    fn linear(&self, index: f64) -> f64 {
        let base = index.floor();
        let t = index - base;
        let base = base as i64;

        let a = self.bin(base);
        let b = self.bin(base + 1);
        a + (b - a) * t
    }

    fn spline(&self, index: f64) -> f64 {
        let base = index.floor();
        let t = index - base;
        let base = base as i64;

        let aa = self.bin(base - 1);
        let a = self.bin(base);
        let b = self.bin(base + 1);
        let bb = self.bin(base + 2);

        // Tangents at a and b
        let da = (b - aa) / 2.0;
        let db = (bb - a) / 2.0;

        let t2 = t * t;
        let t3 = t2 * t;
        let p = 2.0 * a + da - 2.0 * b + db;
        let q = -3.0 * a - 2.0 * da + 3.0 * b - db;

        p * t3 + q * t2 + da * t + a
    }
}

impl SpectrumQuery for SpectrumResult {
    fn max_valid_freq(&self) -> f64 {
        self.sample_rate / 2.0
    }

    fn value(&self, freq: f64, mode: InterpolationMode) -> f64 {
        let index = self.freq_to_index(freq);
        match mode {
            InterpolationMode::Step => self.step(index),
            InterpolationMode::Linear => self.linear(index),
            InterpolationMode::Spline => self.spline(index),
        }
    }

    fn peak(&self, min_freq: f64, max_freq: f64) -> Peak {
        let mut peak = Peak::empty(min_freq);
        if self.bins.is_empty() || !(min_freq < max_freq) {
            return peak;
        }

        let first = self.freq_to_index(min_freq).floor().max(0.0) as usize;
        let last = (self.freq_to_index(max_freq).ceil().max(0.0) as usize).min(self.bins.len() - 1);

        for i in first..=last {
            let freq = self.index_to_freq(i as f64);
            if freq < min_freq || freq >= max_freq {
                continue;
            }
            let value = self.bins[i];
            // Strict compare keeps the lowest-frequency bin on ties
            if peak.value < value {
                peak = Peak {
                    frequency: freq,
                    value,
                };
            }
        }

        peak
    }
}
