//! The animation loop.
//!
//! One task owns the simulation and is the only writer of train state. Input
//! arrives through an `mpsc` channel and is drained right before each tick;
//! the newest frame is published through a `watch` channel.

use std::time::Duration;

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use trackline_core::prelude::{Frame, InputEvent, Simulation};

pub struct AnimationHandle {
    pub events: mpsc::Sender<InputEvent>,
    pub frames: watch::Receiver<Frame>,
    pub task: JoinHandle<()>,
}

/// Start ticking `simulation` `tick_hz` times per second.
///
/// The first frame is computed before returning so readers always have one.
/// The loop stops once every event sender has been dropped.
pub fn spawn(mut simulation: Simulation, tick_hz: u32, event_buffer: usize) -> AnimationHandle {
    let (event_tx, mut event_rx) = mpsc::channel(event_buffer);
    let (frame_tx, frame_rx) = watch::channel(simulation.step());
    let period = Duration::from_secs_f64(1.0 / f64::from(tick_hz.max(1)));

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            loop {
                match event_rx.try_recv() {
                    Ok(event) => {
                        debug!(%event, "input event");
                        simulation.push_event(event);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        info!(ticks = simulation.ticks(), "animation stopped");
                        return;
                    }
                }
            }

            frame_tx.send_replace(simulation.step());
        }
    });

    AnimationHandle {
        events: event_tx,
        frames: frame_rx,
        task,
    }
}
