use pyo3::prelude::*;

use network::PyPathNetwork;
use stations::py_import_stations;
use train::PyTrain;

pub mod network;
pub mod stations;
pub mod train;

pub(crate) fn value_error(context: &str, e: trackline_core::Error) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{context}: {e}"))
}

/// A Python module implemented in Rust.
#[pymodule]
fn trackline(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyPathNetwork>()?;
    m.add_class::<PyTrain>()?;
    m.add_function(wrap_pyfunction!(py_import_stations, m)?)?;
    Ok(())
}
