//! Path network and train traversal.
//!
//! A [`PathGraph`] holds a set of traversable segments ("paths") and the links
//! between their ends. A [`Train`] walks the graph one tick at a time, choosing
//! which path to enter next from the connections at the end it reaches and
//! its current turn preference.
//!
//! Layers, inner to outer:
//!
//! - **geometry**: curve sampling behind the [`PathGeometry`] trait
//! - **model**: paths, connections and the immutable graph
//! - **loading**: input descriptors, graph builder, station importer
//! - **train**: the per-tick state machine and input events
//! - **simulation**: event queue and frame output around one train

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod simulation;
pub mod train;

pub use error::Error;
pub use geometry::{Curve, PathGeometry};
pub use loading::{NetworkInput, PathGraphBuilder, build_path_graph, load_network};
pub use model::{Connection, Link, Path, PathEnd, PathGraph, PathPort};
pub use simulation::{Frame, Simulation, TrainConfig};
pub use train::{Direction, InputEvent, Placement, Train, TurnDirection};

/// Identifier of a path as given in the input descriptors.
pub type PathId = u32;

/// Dense position of a path inside a [`PathGraph`].
pub type PathIndex = usize;
