//! This module is responsible for reading network descriptions and building
//! the path graph from them.

mod builder;
mod config;
mod raw_types;
pub mod stations;

pub use builder::{PathGraphBuilder, build_path_graph, load_network};
pub use config::NetworkConfig;
pub use raw_types::{ConnectionInput, InputPoint, NetworkInput, PathInput, PortInput};
