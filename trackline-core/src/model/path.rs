//! A single traversable segment and its connections.

use std::fmt;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::geometry::{Curve, PathGeometry};
use crate::{PathId, PathIndex};

/// One of the two ends of a path. Encoded as `0` and `1` in input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PathEnd {
    /// Distance zero.
    Start,
    /// Distance equal to the path length.
    End,
}

impl PathEnd {
    pub fn index(self) -> usize {
        match self {
            PathEnd::Start => 0,
            PathEnd::End => 1,
        }
    }
}

impl TryFrom<u8> for PathEnd {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PathEnd::Start),
            1 => Ok(PathEnd::End),
            other => Err(format!("path end must be 0 or 1, got {other}")),
        }
    }
}

impl From<PathEnd> for u8 {
    fn from(end: PathEnd) -> u8 {
        match end {
            PathEnd::Start => 0,
            PathEnd::End => 1,
        }
    }
}

impl fmt::Display for PathEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Outgoing link from one end of a path: the neighbor and the end of the
/// neighbor that the link arrives at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Connection {
    pub neighbor: PathIndex,
    pub neighbor_end: PathEnd,
}

/// Path segment
#[derive(Debug, Clone)]
pub struct Path<G = Curve> {
    id: PathId,
    /// Fixed at construction from `geometry`.
    length: f64,
    geometry: G,
    /// Outgoing connections, indexed by `PathEnd::index`. The `End` list holds
    /// the positive connections, the `Start` list the negative ones.
    connections: [Vec<Connection>; 2],
}

impl<G: PathGeometry> Path<G> {
    pub(crate) fn new(id: PathId, geometry: G) -> Self {
        let length = geometry.length().max(0.0);
        Self {
            id,
            length,
            geometry,
            connections: [Vec::new(), Vec::new()],
        }
    }

    /// Coordinate at `distance` from the start. Performs no clamping.
    pub fn point_at(&self, distance: f64) -> Coord<f64> {
        self.geometry.point_at(distance)
    }

    /// Exact coordinate of one end.
    pub fn endpoint(&self, end: PathEnd) -> Coord<f64> {
        match end {
            PathEnd::Start => self.point_at(0.0),
            PathEnd::End => self.point_at(self.length),
        }
    }
}

impl<G> Path<G> {
    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Connections leaving this path through `end`, in registration order.
    pub fn connections(&self, end: PathEnd) -> &[Connection] {
        &self.connections[end.index()]
    }

    /// Connections leaving through the `End` side.
    pub fn positive_connections(&self) -> &[Connection] {
        self.connections(PathEnd::End)
    }

    /// Connections leaving through the `Start` side.
    pub fn negative_connections(&self) -> &[Connection] {
        self.connections(PathEnd::Start)
    }

    /// Pick the connection to follow when leaving through `end`.
    ///
    /// A lone connection is always taken whatever `branch` says; with several,
    /// `branch` indexes the list directly. `None` if the end has no
    /// connections or `branch` is past the last one.
    pub fn connection_at(&self, end: PathEnd, branch: usize) -> Option<Connection> {
        match self.connections(end) {
            [only] => Some(*only),
            list => list.get(branch).copied(),
        }
    }

    /// Register an outgoing connection. Duplicates are kept.
    pub(crate) fn add_outgoing_connection(
        &mut self,
        end: PathEnd,
        neighbor: PathIndex,
        neighbor_end: PathEnd,
    ) {
        self.connections[end.index()].push(Connection {
            neighbor,
            neighbor_end,
        });
    }
}
