use pyo3::prelude::*;
use trackline_core::loading::stations::DEFAULT_CANVAS_SIZE;
use trackline_core::prelude::*;

use crate::value_error;

/// Convert a station CSV into network JSON
///
/// Rows are ``line,index,lat,long`` with a header row. Coordinates are
/// scaled into a ``width`` by ``height`` canvas, each line becomes a chain of
/// straight paths and consecutive paths on a line are connected.
///
/// Parameters
/// ----------
/// csv_path : str
///     Path to the station CSV
/// width : float, default=1000.0
/// height : float, default=1000.0
///
/// Returns
/// -------
/// str
///     JSON accepted by :meth:`PathNetwork.from_json`
#[pyfunction(name = "import_stations")]
#[pyo3(signature = (csv_path, width = DEFAULT_CANVAS_SIZE, height = DEFAULT_CANVAS_SIZE))]
pub fn py_import_stations(csv_path: std::path::PathBuf, width: f64, height: f64) -> PyResult<String> {
    let network = import_stations_file(&csv_path, width, height)
        .map_err(|e| value_error("Failed to import stations", e))?;
    network
        .to_json_string()
        .map_err(|e| value_error("Failed to serialize network", e))
}
