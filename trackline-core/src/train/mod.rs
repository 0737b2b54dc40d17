//! The train and its per-tick state machine.
//!
//! A train occupies one path at a time. Each tick it first resolves a
//! boundary crossing left over from the previous step (switching to a
//! connected path or bouncing at a dead end), then reports its position and
//! finally advances by one step. Overshooting an end is therefore always
//! resolved on the following tick, and a train switches paths at most once
//! per tick.

mod events;

pub use events::InputEvent;

use geo::Coord;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::geometry::PathGeometry;
use crate::model::{Connection, PathEnd, PathGraph};
use crate::{Error, PathId, PathIndex};

/// Sign of travel along the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Backward => -1.0,
            Direction::Forward => 1.0,
        }
    }

    /// `-1` and `1` map to `Backward` and `Forward`; anything else is `None`.
    pub fn from_sign(sign: i64) -> Option<Self> {
        match sign {
            -1 => Some(Direction::Backward),
            1 => Some(Direction::Forward),
            _ => None,
        }
    }
}

/// Which branch to take at an end with more than one connection.
///
/// `Left` picks the first registered connection, `Right` the second. The
/// preference is binary, so it can never index past a junction with at least
/// two branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    #[default]
    Left,
    Right,
}

impl TurnDirection {
    pub fn index(self) -> usize {
        match self {
            TurnDirection::Left => 0,
            TurnDirection::Right => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TurnDirection::Left),
            1 => Some(TurnDirection::Right),
            _ => None,
        }
    }
}

/// Where a tick placed the train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub path: PathIndex,
    /// Distance the position was sampled at, before the step was applied.
    pub distance: f64,
    pub position: Coord<f64>,
}

/// A point moving along a [`PathGraph`].
///
/// The train stores the arena index of its path, so it must always be ticked
/// against the graph it was created for.
#[derive(Debug, Clone, PartialEq)]
pub struct Train {
    speed: f64,
    distance: f64,
    direction: Direction,
    turn: TurnDirection,
    current: PathIndex,
}

impl Train {
    /// Place a train on the path with id `path`.
    ///
    /// # Errors
    ///
    /// Fails if `path` is not in `graph`, if `speed` is not a positive finite
    /// number, or if `distance` is outside the path.
    pub fn new<G: PathGeometry>(
        graph: &PathGraph<G>,
        path: PathId,
        speed: f64,
        distance: f64,
        direction: Direction,
        turn: TurnDirection,
    ) -> Result<Self, Error> {
        let current = graph.require(path)?;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(Error::InvalidSpeed(speed));
        }
        let length = graph[current].length();
        if !(0.0..=length).contains(&distance) {
            return Err(Error::InvalidDistance {
                path,
                distance,
                length,
            });
        }

        Ok(Self {
            speed,
            distance,
            direction,
            turn,
            current,
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn turn(&self) -> TurnDirection {
        self.turn
    }

    pub fn current_path(&self) -> PathIndex {
        self.current
    }

    /// Override the direction of travel. Takes effect on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_turn(&mut self, turn: TurnDirection) {
        self.turn = turn;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::TurnLeft => self.turn = TurnDirection::Left,
            InputEvent::TurnRight => self.turn = TurnDirection::Right,
            InputEvent::Forward => self.direction = Direction::Forward,
            InputEvent::Backward => self.direction = Direction::Backward,
        }
    }

    /// Run one animation step and return where the train is drawn.
    pub fn tick<G: PathGeometry>(&mut self, graph: &PathGraph<G>) -> Placement {
        let length = graph[self.current].length();
        if self.distance >= length {
            self.leave(graph, PathEnd::End);
        } else if self.distance <= 0.0 {
            self.leave(graph, PathEnd::Start);
        }

        let path = &graph[self.current];
        let placement = Placement {
            path: self.current,
            distance: self.distance,
            position: path.point_at(self.distance.clamp(0.0, path.length())),
        };

        self.distance += self.speed * self.direction.sign();
        placement
    }

    /// Cross `end` of the current path: enter the chosen neighbor, or turn
    /// around if nothing is connected there.
    fn leave<G: PathGeometry>(&mut self, graph: &PathGraph<G>, end: PathEnd) {
        let from = graph[self.current].id();
        let Some(Connection {
            neighbor,
            neighbor_end,
        }) = graph[self.current].connection_at(end, self.turn.index())
        else {
            self.direction = match end {
                PathEnd::End => Direction::Backward,
                PathEnd::Start => Direction::Forward,
            };
            trace!("Train bounced at end {end} of path {from}");
            return;
        };

        let next = &graph[neighbor];
        match (end, neighbor_end) {
            (_, PathEnd::End) => {
                self.distance = next.length();
                self.direction = Direction::Backward;
            }
            (PathEnd::End, PathEnd::Start) => {
                self.distance = 0.0;
            }
            (PathEnd::Start, PathEnd::Start) => {
                self.distance = 0.0;
                self.direction = Direction::Forward;
            }
        }
        debug!(
            "Train left path {from} at end {end} for path {} at end {neighbor_end}",
            next.id()
        );
        self.current = neighbor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::{InputPoint, NetworkInput, PathInput, build_path_graph};
    use geo::coord;

    fn line(id: PathId, from: (f64, f64), to: (f64, f64)) -> PathInput {
        PathInput {
            id,
            origin: InputPoint { x: from.0, y: from.1 },
            destination: InputPoint { x: to.0, y: to.1 },
            midpoint: None,
        }
    }

    fn isolated(length: f64) -> PathGraph {
        build_path_graph(&NetworkInput {
            paths: vec![line(0, (0.0, 0.0), (length, 0.0))],
            connections: vec![],
        })
        .unwrap()
    }

    #[test]
    fn construction_is_validated() {
        let graph = isolated(10.0);
        let new = |path, speed, distance| {
            Train::new(&graph, path, speed, distance, Direction::Forward, TurnDirection::Left)
        };

        assert!(new(0, 4.0, 0.0).is_ok());
        assert!(matches!(new(3, 4.0, 0.0), Err(Error::UnknownPath(3))));
        assert!(matches!(new(0, 0.0, 0.0), Err(Error::InvalidSpeed(_))));
        assert!(matches!(new(0, -1.0, 0.0), Err(Error::InvalidSpeed(_))));
        assert!(matches!(new(0, f64::NAN, 0.0), Err(Error::InvalidSpeed(_))));
        assert!(matches!(new(0, 4.0, 10.5), Err(Error::InvalidDistance { .. })));
    }

    #[test]
    fn dead_end_bounces_in_place() {
        let graph = isolated(10.0);
        let mut train =
            Train::new(&graph, 0, 4.0, 8.0, Direction::Forward, TurnDirection::Left).unwrap();

        let first = train.tick(&graph);
        assert_eq!(first.position, coord! { x: 8.0, y: 0.0 });
        assert_eq!(train.distance(), 12.0);

        // Overshoot is resolved on the next tick: bounce, position clamped.
        let second = train.tick(&graph);
        assert_eq!(train.direction(), Direction::Backward);
        assert_eq!(second.position, coord! { x: 10.0, y: 0.0 });
        assert_eq!(second.path, 0);
        assert_eq!(train.distance(), 8.0);
    }

    #[test]
    fn backward_dead_end_turns_forward() {
        let graph = isolated(10.0);
        let mut train =
            Train::new(&graph, 0, 3.0, 0.0, Direction::Backward, TurnDirection::Left).unwrap();
        train.tick(&graph);
        assert_eq!(train.direction(), Direction::Forward);
        assert_eq!(train.distance(), 3.0);
    }

    #[test]
    fn events_update_fields() {
        let graph = isolated(10.0);
        let mut train =
            Train::new(&graph, 0, 1.0, 5.0, Direction::Forward, TurnDirection::Left).unwrap();

        train.apply(InputEvent::TurnRight);
        train.apply(InputEvent::Backward);
        assert_eq!(train.turn(), TurnDirection::Right);
        assert_eq!(train.direction(), Direction::Backward);

        train.apply(InputEvent::TurnLeft);
        train.apply(InputEvent::Forward);
        assert_eq!(train.turn(), TurnDirection::Left);
        assert_eq!(train.direction(), Direction::Forward);
    }

    #[test]
    fn manual_reverse_applies_from_the_next_step() {
        let graph = isolated(10.0);
        let mut train =
            Train::new(&graph, 0, 2.0, 5.0, Direction::Forward, TurnDirection::Left).unwrap();
        train.tick(&graph);
        assert_eq!(train.distance(), 7.0);
        train.set_direction(Direction::Backward);
        let placement = train.tick(&graph);
        assert_eq!(placement.distance, 7.0);
        assert_eq!(train.distance(), 5.0);
    }

    #[test]
    fn conversions() {
        assert_eq!(Direction::from_sign(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0), None);
        assert_eq!(TurnDirection::from_index(1), Some(TurnDirection::Right));
        assert_eq!(TurnDirection::from_index(2), None);
        assert_eq!(TurnDirection::Right.index(), 1);
    }
}
