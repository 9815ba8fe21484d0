//! Python bindings for multi-band analysis

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use super::parse_mode;
use super::spectrum_bindings::PySpectrumResult;
use crate::signal::SampleBuffer;
use crate::spectrum::{CompositeResult, MultiBandAnalyzer, SpectrumQuery};
use crate::tonal;

/// Octave-composite result exposed to Python
#[pyclass(name = "CompositeResult")]
pub struct PyCompositeResult {
    result: CompositeResult,
}

#[pymethods]
impl PyCompositeResult {
    /// Magnitude at a frequency, read from the band routed for it
    #[pyo3(signature = (freq, mode="spline"))]
    fn get_value(&self, freq: f64, mode: &str) -> PyResult<f64> {
        Ok(self.result.value(freq, parse_mode(mode)?))
    }

    /// Magnitudes at many frequencies
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

    /// Strongest bin in [min_freq, max_freq), routed on max_freq
    fn get_peak(&self, min_freq: f64, max_freq: f64) -> (f64, f64) {
        self.result.peak(min_freq, max_freq).into()
    }

    /// Index of the band answering queries at `freq`
    fn band_for(&self, freq: f64) -> usize {
        self.result.band_for(freq)
    }

    /// Spectrum of one band
    fn band(&self, index: usize) -> PyResult<PySpectrumResult> {
        let band = self
            .result
            .bands()
            .get(index)
            .ok_or_else(|| PyIndexError::new_err(format!("no band {}", index)))?;

        Ok(PySpectrumResult {
            result: band.clone(),
        })
    }

    /// 12 pitch-class strengths, A through G#
    fn chroma<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, &tonal::chroma(&self.result))
    }

    #[getter]
    fn band_count(&self) -> usize {
        self.result.band_count()
    }

    #[getter]
    fn max_valid_freq(&self) -> f64 {
        self.result.max_valid_freq()
    }
}

/// Multi-octave analyzer exposed to Python
#[pyclass(name = "MultiBandAnalyzer")]
pub struct PyMultiBandAnalyzer {
    analyzer: MultiBandAnalyzer,
}

#[pymethods]
impl PyMultiBandAnalyzer {
    /// Build the octave band chain
    ///
    /// Args:
    ///     samples: Mono samples as numpy array
    ///     sample_rate: Sample rate in Hz
    ///     octave_count: Number of octave bands
    #[new]
    #[pyo3(signature = (samples, sample_rate, octave_count=8))]
    fn new(samples: PyReadonlyArray1<f64>, sample_rate: f64, octave_count: usize) -> PyResult<Self> {
        let samples = samples
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .to_vec();
        let buffer = SampleBuffer::new(samples, sample_rate)?;

        Ok(Self {
            analyzer: MultiBandAnalyzer::new(buffer, octave_count)?,
        })
    }

    /// Analyse every band at a playback time
    ///
    /// Args:
    ///     time_ms: Playback time in milliseconds
    ///     frame_size: Frame length in samples, shared by all bands
    #[pyo3(signature = (time_ms, frame_size=256))]
    fn analyse_at(&self, time_ms: f64, frame_size: usize) -> PyResult<PyCompositeResult> {
        Ok(PyCompositeResult {
            result: self.analyzer.analyse_at(time_ms, frame_size)?,
        })
    }

    #[getter]
    fn band_count(&self) -> usize {
        self.analyzer.band_count()
    }
}
