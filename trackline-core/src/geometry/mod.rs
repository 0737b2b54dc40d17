//! Curve sampling for paths.
//!
//! The traversal logic never computes curve geometry itself. Each path carries
//! a value implementing [`PathGeometry`], which answers two questions: how long
//! the path is, and where a point lies a given distance from its start.

mod curve;

pub use curve::{Curve, QUADRATIC_SEGMENTS};

use geo::Coord;

/// Arc-length parametrised geometry of a single path.
///
/// Implementations must be continuous and monotonic in `distance`, and must
/// return the exact start coordinate for `point_at(0.0)` and the exact end
/// coordinate for `point_at(self.length())`; the graph builder compares
/// endpoints for equality when validating connections.
pub trait PathGeometry {
    /// Total length of the path. Never negative.
    fn length(&self) -> f64;

    /// Coordinate `distance` units along the path from its start.
    ///
    /// Callers are expected to pass a distance within `[0, length]`.
    fn point_at(&self, distance: f64) -> Coord<f64>;
}

impl<T: PathGeometry + ?Sized> PathGeometry for &T {
    fn length(&self) -> f64 {
        (**self).length()
    }

    fn point_at(&self, distance: f64) -> Coord<f64> {
        (**self).point_at(distance)
    }
}
