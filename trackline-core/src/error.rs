use thiserror::Error;

use crate::{PathEnd, PathId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection references unknown path {path} (end {end})")]
    DanglingReference { path: PathId, end: PathEnd },
    #[error("Path {0} is declared more than once")]
    DuplicatePath(PathId),
    #[error("Unknown path {0}")]
    UnknownPath(PathId),
    #[error("Train speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),
    #[error("Distance {distance} lies outside path {path} of length {length}")]
    InvalidDistance {
        path: PathId,
        distance: f64,
        length: f64,
    },
    #[error("Unknown input event: {0}")]
    InvalidEvent(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}
