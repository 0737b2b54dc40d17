use geo::{Coord, coord};
use serde::{Deserialize, Serialize};

use crate::geometry::Curve;
use crate::{Error, PathEnd, PathId};

/// One side of a connection descriptor: `[pathId, end]`.
pub type PortInput = (PathId, PathEnd);

/// A connection descriptor: the two path ends to join.
pub type ConnectionInput = [PortInput; 2];

/// Network description as read from the JSON input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInput {
    #[serde(rename = "pathsInput", default)]
    pub paths: Vec<PathInput>,
    #[serde(rename = "connectionsInput", default)]
    pub connections: Vec<ConnectionInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathInput {
    pub id: PathId,
    pub origin: InputPoint,
    pub destination: InputPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub midpoint: Option<InputPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputPoint {
    pub x: f64,
    pub y: f64,
}

impl From<InputPoint> for Coord<f64> {
    fn from(point: InputPoint) -> Self {
        coord! { x: point.x, y: point.y }
    }
}

impl From<Coord<f64>> for InputPoint {
    fn from(coord: Coord<f64>) -> Self {
        InputPoint {
            x: coord.x,
            y: coord.y,
        }
    }
}

impl PathInput {
    /// Quadratic through `midpoint` when one is given, straight otherwise.
    pub fn curve(&self) -> Curve {
        match self.midpoint {
            Some(midpoint) => Curve::quadratic(
                self.origin.into(),
                midpoint.into(),
                self.destination.into(),
            ),
            None => Curve::straight(self.origin.into(), self.destination.into()),
        }
    }
}

impl NetworkInput {
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}
