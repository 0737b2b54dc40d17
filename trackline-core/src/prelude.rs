// Re-export key components
pub use crate::geometry::{Curve, PathGeometry};
pub use crate::loading::stations::{import_stations, import_stations_file};
pub use crate::loading::{
    NetworkConfig, NetworkInput, PathGraphBuilder, build_path_graph, load_network,
};
pub use crate::model::{Connection, Link, Path, PathEnd, PathGraph, PathPort};
pub use crate::simulation::{Frame, Simulation, TrainConfig};
pub use crate::train::{Direction, InputEvent, Placement, Train, TurnDirection};

pub use crate::Error;
pub use crate::PathId;
pub use crate::PathIndex;
