use std::path::PathBuf;
use std::sync::Arc;

use pyo3::prelude::*;
use trackline_core::prelude::*;

use crate::value_error;

/// PathNetwork
///
/// An immutable graph of paths and the links between their ends, built from
/// the JSON input format (``pathsInput`` and ``connectionsInput``).
///
/// Connections whose endpoints do not coincide are skipped with a warning on
/// the ``trackline`` logger; a connection naming an unknown path fails the
/// whole build.
///
/// Example:
///
/// .. code-block:: python
///
///     network = PathNetwork.from_file("mta-input.json")
///     train = Train(network, path_id=0, speed=4.0)
#[pyclass(name = "PathNetwork", frozen)]
pub struct PyPathNetwork {
    pub(crate) graph: Arc<PathGraph>,
}

#[pymethods]
impl PyPathNetwork {
    /// Build a network from a JSON string.
    #[staticmethod]
    pub fn from_json(text: &str) -> PyResult<Self> {
        let input = NetworkInput::from_json_str(text)
            .map_err(|e| value_error("Failed to parse network", e))?;
        let graph =
            build_path_graph(&input).map_err(|e| value_error("Failed to build network", e))?;
        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Build a network from a JSON file.
    #[staticmethod]
    pub fn from_file(path: PathBuf) -> PyResult<Self> {
        let graph = load_network(&NetworkConfig { input: path })
            .map_err(|e| value_error("Failed to load network", e))?;
        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    pub fn path_count(&self) -> usize {
        self.graph.path_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.link_count()
    }

    pub fn path_ids(&self) -> Vec<PathId> {
        self.graph.paths().iter().map(|path| path.id()).collect()
    }

    /// Length of the path with id ``path_id``.
    pub fn path_length(&self, path_id: PathId) -> PyResult<f64> {
        let path = self
            .graph
            .by_id(path_id)
            .ok_or_else(|| value_error("Unknown path", Error::UnknownPath(path_id)))?;
        Ok(path.length())
    }

    /// Coordinate ``(x, y)`` at ``distance`` along path ``path_id``.
    pub fn point_at(&self, path_id: PathId, distance: f64) -> PyResult<(f64, f64)> {
        let path = self
            .graph
            .by_id(path_id)
            .ok_or_else(|| value_error("Unknown path", Error::UnknownPath(path_id)))?;
        let point = path.point_at(distance);
        Ok((point.x, point.y))
    }

    fn __repr__(&self) -> String {
        format!(
            "PathNetwork with {} paths and {} links",
            self.graph.path_count(),
            self.graph.link_count()
        )
    }

    fn __str__(&self) -> String {
        self.__repr__()
    }
}
