//! Data model for the path network
//!
//! Contains paths, the connections between their ends and the graph that owns
//! them.

pub mod graph;
pub mod path;

pub use graph::{Link, PathGraph, PathPort};
pub use path::{Connection, Path, PathEnd};
