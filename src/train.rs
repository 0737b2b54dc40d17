use std::sync::Arc;

use pyo3::prelude::*;
use trackline_core::prelude::*;

use crate::network::PyPathNetwork;
use crate::value_error;

/// Train
///
/// A point moving over a :class:`PathNetwork`. Each call to :meth:`tick`
/// reports the current position and then advances by ``speed``.
///
/// Parameters
/// ----------
/// network : PathNetwork
///     Network to run on. The train keeps a shared reference to it.
/// path_id : int, default=0
///     Path the train starts on.
/// speed : float, default=4.0
///     Distance covered per tick, must be positive.
/// distance : float, default=0.0
///     Starting distance along the path.
/// direction : int, default=1
///     ``1`` runs towards the path's end, ``-1`` towards its start.
/// turn : int, default=0
///     ``0`` takes the first branch at a junction, ``1`` the second.
///
/// Raises
/// ------
/// ValueError
///     If any of the parameters is out of range.
#[pyclass(name = "Train")]
pub struct PyTrain {
    network: Arc<PathGraph>,
    train: Train,
}

#[pymethods]
impl PyTrain {
    #[new]
    #[pyo3(signature = (network, path_id=0, speed=4.0, distance=0.0, direction=1, turn=0))]
    pub fn new(
        network: &PyPathNetwork,
        path_id: PathId,
        speed: f64,
        distance: f64,
        direction: i64,
        turn: usize,
    ) -> PyResult<Self> {
        let direction = Direction::from_sign(direction).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "direction must be 1 or -1, got {direction}"
            ))
        })?;
        let turn = TurnDirection::from_index(turn).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "turn must be 0 or 1, got {turn}"
            ))
        })?;

        let graph = Arc::clone(&network.graph);
        let train = Train::new(&graph, path_id, speed, distance, direction, turn)
            .map_err(|e| value_error("Failed to place train", e))?;
        Ok(Self {
            network: graph,
            train,
        })
    }

    /// Run one tick and return the ``(x, y)`` position reported for it.
    pub fn tick(&mut self) -> (f64, f64) {
        let placement = self.train.tick(&self.network);
        (placement.position.x, placement.position.y)
    }

    /// Apply ``turn-left``, ``turn-right``, ``forward`` or ``backward``.
    pub fn apply_event(&mut self, event: &str) -> PyResult<()> {
        let event: InputEvent = event
            .parse()
            .map_err(|e| value_error("Unknown event", e))?;
        self.train.apply(event);
        Ok(())
    }

    /// Apply the event bound to a keyboard code such as ``ArrowLeft``.
    ///
    /// Returns ``False`` for keys without a binding.
    pub fn apply_key(&mut self, code: &str) -> bool {
        match InputEvent::from_key_code(code) {
            Some(event) => {
                self.train.apply(event);
                true
            }
            None => false,
        }
    }

    #[getter]
    fn path_id(&self) -> PathId {
        self.network[self.train.current_path()].id()
    }

    #[getter]
    fn distance(&self) -> f64 {
        self.train.distance()
    }

    #[getter]
    fn speed(&self) -> f64 {
        self.train.speed()
    }

    #[getter]
    fn direction(&self) -> i64 {
        match self.train.direction() {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[getter]
    fn turn(&self) -> usize {
        self.train.turn().index()
    }

    fn __repr__(&self) -> String {
        format!(
            "Train(path_id={}, distance={}, direction={}, turn={})",
            self.path_id(),
            self.train.distance(),
            self.direction(),
            self.turn()
        )
    }
}
