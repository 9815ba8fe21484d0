//! Python bindings for single-band analysis

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::parse_mode;
use crate::signal::SampleBuffer;
use crate::spectrum::{SingleBandAnalyzer, SpectrumQuery, SpectrumResult};

/// Magnitude spectrum exposed to Python
#[pyclass(name = "SpectrumResult")]
pub struct PySpectrumResult {
    pub(super) result: SpectrumResult,
}

#[pymethods]
impl PySpectrumResult {
    /// Magnitude at a frequency
    ///
    /// Args:
    ///     freq: Frequency in Hz
    ///     mode: "step", "linear" or "spline"
    #[pyo3(signature = (freq, mode="spline"))]
    fn get_value(&self, freq: f64, mode: &str) -> PyResult<f64> {
        Ok(self.result.value(freq, parse_mode(mode)?))
    }

    /// Magnitudes at many frequencies
    ///
    /// Returns:
    ///     Values as numpy array, same length as `freqs`
    #[pyo3(signature = (freqs, mode="spline"))]
    fn get_values<'py>(
        &self,
        py: Python<'py>,
        freqs: PyReadonlyArray1<f64>,
        mode: &str,
    ) -> PyResult<&'py PyArray1<f64>> {
        let mode = parse_mode(mode)?;
        let freqs = freqs
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let values = freqs.iter().map(|&f| self.result.value(f, mode)).collect();

        Ok(PyArray1::from_vec(py, values))
    }

    /// Strongest bin in [min_freq, max_freq)
    ///
    /// Returns:
    ///     (frequency, value); value is -inf when no bin lies in range
    fn get_peak(&self, min_freq: f64, max_freq: f64) -> (f64, f64) {
        self.result.peak(min_freq, max_freq).into()
    }

    /// Raw magnitude bins
    fn bins<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.result.bins())
    }

    #[getter]
    fn frequency_resolution(&self) -> f64 {
        self.result.frequency_resolution()
    }

    #[getter]
    fn max_valid_freq(&self) -> f64 {
        self.result.max_valid_freq()
    }

    #[getter]
    fn sample_rate(&self) -> f64 {
        self.result.sample_rate()
    }
}

/// Single-resolution analyzer exposed to Python
#[pyclass(name = "SingleBandAnalyzer")]
pub struct PySingleBandAnalyzer {
    analyzer: SingleBandAnalyzer,
}

#[pymethods]
impl PySingleBandAnalyzer {
    /// Create an analyzer over decoded samples
    ///
    /// Args:
    ///     samples: Mono samples as numpy array
    ///     sample_rate: Sample rate in Hz
    #[new]
    fn new(samples: PyReadonlyArray1<f64>, sample_rate: f64) -> PyResult<Self> {
        let samples = samples
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .to_vec();
        let buffer = SampleBuffer::new(samples, sample_rate)?;

        Ok(Self {
            analyzer: SingleBandAnalyzer::new(buffer),
        })
    }

    /// Analyse the frame centred at a playback time
    ///
    /// Args:
    ///     time_ms: Playback time in milliseconds
    ///     frame_size: Frame length in samples (power of 2)
    #[pyo3(signature = (time_ms, frame_size=1024))]
    fn analyse_at(&self, time_ms: f64, frame_size: usize) -> PyResult<PySpectrumResult> {
        Ok(PySpectrumResult {
            result: self.analyzer.analyse_at(time_ms, frame_size)?,
        })
    }

    #[getter]
    fn sample_rate(&self) -> f64 {
        self.analyzer.sample_rate()
    }
}
