//! Drives one train over a shared graph.
//!
//! Input events are queued as they arrive and applied in order right before
//! the next tick, so the last event of a kind wins. Each tick yields a
//! [`Frame`] for whoever draws the train.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{Curve, PathGeometry};
use crate::model::PathGraph;
use crate::train::{Direction, InputEvent, Train, TurnDirection};
use crate::{Error, PathId};

/// Starting state of a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub speed: f64,
    pub start_path: PathId,
    pub start_distance: f64,
    pub direction: Direction,
    pub turn: TurnDirection,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            start_path: 0,
            start_distance: 0.0,
            direction: Direction::Forward,
            turn: TurnDirection::Left,
        }
    }
}

impl TrainConfig {
    /// # Errors
    ///
    /// See [`Train::new`].
    pub fn spawn<G: PathGeometry>(&self, graph: &PathGraph<G>) -> Result<Train, Error> {
        Train::new(
            graph,
            self.start_path,
            self.speed,
            self.start_distance,
            self.direction,
            self.turn,
        )
    }
}

/// Output of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based tick counter.
    pub tick: u64,
    pub path_id: PathId,
    pub distance: f64,
    pub direction: Direction,
    pub turn: TurnDirection,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct Simulation<G = Curve> {
    graph: Arc<PathGraph<G>>,
    train: Train,
    pending: VecDeque<InputEvent>,
    ticks: u64,
}

impl<G: PathGeometry> Simulation<G> {
    pub fn new(graph: Arc<PathGraph<G>>, train: Train) -> Self {
        Self {
            graph,
            train,
            pending: VecDeque::new(),
            ticks: 0,
        }
    }

    /// # Errors
    ///
    /// See [`Train::new`].
    pub fn from_config(graph: Arc<PathGraph<G>>, config: &TrainConfig) -> Result<Self, Error> {
        let train = config.spawn(&graph)?;
        Ok(Self::new(graph, train))
    }

    pub fn graph(&self) -> &Arc<PathGraph<G>> {
        &self.graph
    }

    pub fn train(&self) -> &Train {
        &self.train
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Queue `event` for the next tick.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn step(&mut self) -> Frame {
        while let Some(event) = self.pending.pop_front() {
            self.train.apply(event);
        }

        let placement = self.train.tick(&self.graph);
        let frame = Frame {
            tick: self.ticks,
            path_id: self.graph[placement.path].id(),
            distance: placement.distance,
            direction: self.train.direction(),
            turn: self.train.turn(),
            x: placement.position.x,
            y: placement.position.y,
        };
        self.ticks += 1;
        frame
    }

    pub fn run(&mut self, ticks: usize) -> Vec<Frame> {
        (0..ticks).map(|_| self.step()).collect()
    }
}
