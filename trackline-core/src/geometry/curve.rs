use geo::{Coord, LineString};
use itertools::Itertools;

use super::PathGeometry;

/// Number of straight pieces a quadratic Bézier is flattened into.
pub const QUADRATIC_SEGMENTS: usize = 32;

/// A path drawn either as a straight segment or as a quadratic Bézier,
/// stored as a polyline with the arc length at every vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    line: LineString<f64>,
    /// Arc length from the start to each vertex of `line`. Starts at zero and
    /// never decreases.
    offsets: Vec<f64>,
}

impl Curve {
    /// Straight segment from `origin` to `destination`.
    pub fn straight(origin: Coord<f64>, destination: Coord<f64>) -> Self {
        Self::from_vertices(vec![origin, destination])
    }

    /// Quadratic Bézier from `origin` to `destination` pulled towards
    /// `control`.
    #[allow(clippy::cast_precision_loss)]
    pub fn quadratic(origin: Coord<f64>, control: Coord<f64>, destination: Coord<f64>) -> Self {
        let vertices = (0..=QUADRATIC_SEGMENTS)
            .map(|step| match step {
                0 => origin,
                QUADRATIC_SEGMENTS => destination,
                _ => {
                    let t = step as f64 / QUADRATIC_SEGMENTS as f64;
                    let u = 1.0 - t;
                    origin * (u * u) + control * (2.0 * u * t) + destination * (t * t)
                }
            })
            .collect();
        Self::from_vertices(vertices)
    }

    fn from_vertices(vertices: Vec<Coord<f64>>) -> Self {
        let offsets = std::iter::once(0.0)
            .chain(
                vertices
                    .iter()
                    .tuple_windows()
                    .scan(0.0, |total, (&a, &b)| {
                        *total += segment_length(a, b);
                        Some(*total)
                    }),
            )
            .collect();

        Self {
            line: LineString::new(vertices),
            offsets,
        }
    }

    /// The flattened polyline, e.g. for drawing.
    pub fn line_string(&self) -> &LineString<f64> {
        &self.line
    }

    pub fn start(&self) -> Coord<f64> {
        self.line.0[0]
    }

    pub fn end(&self) -> Coord<f64> {
        self.line.0[self.line.0.len() - 1]
    }
}

impl PathGeometry for Curve {
    fn length(&self) -> f64 {
        self.offsets[self.offsets.len() - 1]
    }

    fn point_at(&self, distance: f64) -> Coord<f64> {
        let length = self.length();
        if distance.is_nan() || distance <= 0.0 {
            return self.start();
        }
        if distance >= length {
            return self.end();
        }

        // 0 < distance < length, so the first vertex at or past `distance`
        // is neither the first nor past the last one.
        let upper = self.offsets.partition_point(|&offset| offset < distance);
        let (a, b) = (self.line.0[upper - 1], self.line.0[upper]);
        let span = self.offsets[upper] - self.offsets[upper - 1];
        if span <= 0.0 {
            return b;
        }
        let t = (distance - self.offsets[upper - 1]) / span;
        a + (b - a) * t
    }
}

fn segment_length(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta = b - a;
    delta.x.hypot(delta.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn assert_close(actual: Coord<f64>, expected: Coord<f64>) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn straight_segment_length_and_interpolation() {
        let curve = Curve::straight(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 4.0 });
        assert_eq!(curve.length(), 5.0);
        assert_close(curve.point_at(2.5), coord! { x: 1.5, y: 2.0 });
    }

    #[test]
    fn endpoints_are_exact() {
        let origin = coord! { x: 0.1, y: 0.7 };
        let destination = coord! { x: 13.3, y: -2.9 };
        for curve in [
            Curve::straight(origin, destination),
            Curve::quadratic(origin, coord! { x: 5.0, y: 9.0 }, destination),
        ] {
            assert_eq!(curve.point_at(0.0), origin);
            assert_eq!(curve.point_at(curve.length()), destination);
        }
    }

    #[test]
    fn out_of_range_distances_stick_to_the_ends() {
        let curve = Curve::straight(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 });
        assert_eq!(curve.point_at(-3.0), coord! { x: 0.0, y: 0.0 });
        assert_eq!(curve.point_at(12.0), coord! { x: 10.0, y: 0.0 });
        assert_eq!(curve.point_at(f64::NAN), coord! { x: 0.0, y: 0.0 });
    }

    #[test]
    fn quadratic_is_longer_than_its_chord_and_monotonic() {
        let curve = Curve::quadratic(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 5.0, y: 10.0 },
            coord! { x: 10.0, y: 0.0 },
        );
        assert!(curve.length() > 10.0);
        assert_eq!(curve.line_string().0.len(), QUADRATIC_SEGMENTS + 1);

        // Symmetric control point: the halfway point is the apex.
        assert_close(curve.point_at(curve.length() / 2.0), coord! { x: 5.0, y: 5.0 });

        let mut previous = curve.point_at(0.0);
        for step in 1..=100 {
            let point = curve.point_at(curve.length() * f64::from(step) / 100.0);
            assert!(point.x >= previous.x);
            previous = point;
        }
    }

    #[test]
    fn degenerate_curve_has_one_point() {
        let spot = coord! { x: 4.0, y: 4.0 };
        let curve = Curve::straight(spot, spot);
        assert_eq!(curve.length(), 0.0);
        assert_eq!(curve.point_at(0.0), spot);
        assert_eq!(curve.point_at(1.0), spot);
    }
}
