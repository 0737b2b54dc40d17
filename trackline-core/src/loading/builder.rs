use std::fs::File;
use std::io::BufReader;

use log::{debug, info, warn};

use super::config::NetworkConfig;
use super::raw_types::{NetworkInput, PortInput};
use crate::geometry::{Curve, PathGeometry};
use crate::model::{Path, PathGraph, PathPort};
use crate::{Error, PathEnd, PathId, PathIndex};

/// Assembles a [`PathGraph`].
///
/// Paths must be added before the connections that mention them. Once
/// [`build`](Self::build) is called the graph is frozen.
#[derive(Debug)]
pub struct PathGraphBuilder<G = Curve> {
    graph: PathGraph<G>,
    skipped: usize,
}

impl<G: PathGeometry> Default for PathGraphBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: PathGeometry> PathGraphBuilder<G> {
    pub fn new() -> Self {
        Self {
            graph: PathGraph::new(),
            skipped: 0,
        }
    }

    /// Register a path. Its length is taken from `geometry` once, here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicatePath`] if `id` is already registered.
    pub fn add_path(&mut self, id: PathId, geometry: G) -> Result<PathIndex, Error> {
        self.graph.insert_path(Path::new(id, geometry))
    }

    /// Join two path ends if their coordinates coincide exactly.
    ///
    /// Returns `Ok(false)` and leaves both paths untouched when the endpoints
    /// differ.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] if either path id is unknown.
    pub fn connect(&mut self, first: PortInput, second: PortInput) -> Result<bool, Error> {
        let a = self.resolve(first)?;
        let b = self.resolve(second)?;

        let a_point = self.graph[a.path].endpoint(a.end);
        let b_point = self.graph[b.path].endpoint(b.end);
        if a_point != b_point {
            warn!(
                "Invalid connection: path {} (end {}) at {:?} does not meet path {} (end {}) at {:?}",
                first.0, first.1, a_point, second.0, second.1, b_point
            );
            self.skipped += 1;
            return Ok(false);
        }

        self.graph.link(a, b);
        Ok(true)
    }

    fn resolve(&self, (path, end): PortInput) -> Result<PathPort, Error> {
        self.graph
            .index_of(path)
            .map(|index| PathPort { path: index, end })
            .ok_or(Error::DanglingReference { path, end })
    }

    pub fn build(self) -> PathGraph<G> {
        for path in self.graph.paths() {
            for end in [PathEnd::Start, PathEnd::End] {
                let branches = path.connections(end).len();
                if branches > 2 {
                    warn!(
                        "Path {} has {branches} connections at end {end}; only the first two can be chosen",
                        path.id()
                    );
                }
            }
        }

        info!(
            "Built path graph with {} paths and {} links ({} connections skipped)",
            self.graph.path_count(),
            self.graph.link_count(),
            self.skipped
        );
        self.graph
    }
}

/// Build the graph described by `input`.
///
/// Connections whose endpoints do not meet are skipped with a warning; a
/// connection naming an unknown path rejects the whole input.
///
/// # Errors
///
/// Returns [`Error::DuplicatePath`] or [`Error::DanglingReference`].
pub fn build_path_graph(input: &NetworkInput) -> Result<PathGraph, Error> {
    let mut builder = PathGraphBuilder::new();

    for path in &input.paths {
        builder.add_path(path.id, path.curve())?;
    }
    debug!("Registered {} paths", input.paths.len());

    for &[first, second] in &input.connections {
        builder.connect(first, second)?;
    }

    Ok(builder.build())
}

/// Read the network file named in `config` and build its graph.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or if building the
/// graph fails.
pub fn load_network(config: &NetworkConfig) -> Result<PathGraph, Error> {
    validate_config(config)?;

    info!("Loading network description: {}", config.input.display());
    let file = File::open(&config.input)?;
    let input = NetworkInput::from_reader(BufReader::new(file))?;

    build_path_graph(&input)
}

fn validate_config(config: &NetworkConfig) -> Result<(), Error> {
    if !config.input.exists() {
        return Err(Error::InvalidData(format!(
            "Network file not found: {}",
            config.input.display()
        )));
    }

    Ok(())
}
