//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SpectrumError;
use crate::spectrum::InterpolationMode;

mod spectrum_bindings;
mod multiband_bindings;

impl From<SpectrumError> for PyErr {
    fn from(err: SpectrumError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_mode(mode: &str) -> PyResult<InterpolationMode> {
    Ok(mode.parse::<InterpolationMode>()?)
}

/// Python module definition
#[pymodule]
fn octave_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<spectrum_bindings::PySpectrumResult>()?;
    m.add_class::<spectrum_bindings::PySingleBandAnalyzer>()?;
    m.add_class::<multiband_bindings::PyCompositeResult>()?;
    m.add_class::<multiband_bindings::PyMultiBandAnalyzer>()?;

    Ok(())
}
