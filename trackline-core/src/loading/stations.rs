//! Turn a CSV of station coordinates into a network description.
//!
//! Each row is `line,index,lat,long`. Stations are projected onto a
//! `width` × `height` canvas, and every pair of consecutive stations on a line
//! becomes a straight path. Consecutive paths of the same line are joined end
//! to start.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use geo::{Coord, coord};
use hashbrown::HashMap;
use itertools::{Itertools, MinMaxResult};
use log::info;

use super::raw_types::{NetworkInput, PathInput};
use crate::{Error, PathEnd, PathId};

/// Canvas size used by the importer when none is given.
pub const DEFAULT_CANVAS_SIZE: f64 = 1000.0;

/// `line,index,lat,long`, read by position so header names do not matter.
type StationRow = (String, String, f64, f64);

#[derive(Debug)]
struct StationRecord {
    line: String,
    lat: f64,
    long: f64,
}

impl From<StationRow> for StationRecord {
    fn from((line, _index, lat, long): StationRow) -> Self {
        Self { line, lat, long }
    }
}

/// Read station rows from `reader` and build the network description.
///
/// # Errors
///
/// Returns an error if a row cannot be parsed.
pub fn import_stations<R: Read>(reader: R, width: f64, height: f64) -> Result<NetworkInput, Error> {
    let records = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize::<StationRow>()
        .map_ok(StationRecord::from)
        .collect::<Result<Vec<_>, _>>()?;

    let (Some((min_long, max_long)), Some((min_lat, max_lat))) = (
        bounds(records.iter().map(|r| r.long)),
        bounds(records.iter().map(|r| r.lat)),
    ) else {
        return Ok(NetworkInput::default());
    };

    // Lines in first-seen order, stations in row order.
    let mut line_slots: HashMap<&str, usize> = HashMap::new();
    let mut lines: Vec<Vec<Coord<f64>>> = Vec::new();
    for record in &records {
        let slot = *line_slots.entry(record.line.as_str()).or_insert_with(|| {
            lines.push(Vec::new());
            lines.len() - 1
        });
        lines[slot].push(coord! {
            x: normalize(record.long, min_long, max_long, width),
            y: normalize(record.lat, min_lat, max_lat, height),
        });
    }

    let mut input = NetworkInput::default();
    let mut next_id: PathId = 0;
    for stations in &lines {
        let mut previous: Option<PathId> = None;
        for (&origin, &destination) in stations.iter().tuple_windows() {
            let id = next_id;
            next_id += 1;
            input.paths.push(PathInput {
                id,
                origin: origin.into(),
                destination: destination.into(),
                midpoint: None,
            });
            if let Some(prev) = previous {
                input
                    .connections
                    .push([(prev, PathEnd::End), (id, PathEnd::Start)]);
            }
            previous = Some(id);
        }
    }

    info!(
        "Imported {} stations on {} lines into {} paths",
        records.len(),
        lines.len(),
        input.paths.len()
    );
    Ok(input)
}

/// [`import_stations`] on a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn import_stations_file(path: &Path, width: f64, height: f64) -> Result<NetworkInput, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    import_stations(file, width, height)
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    match values.minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(value) => Some((value, value)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Map `value` from `[min, max]` onto `[0, extent]`. A zero span maps to 0.
fn normalize(value: f64, min: f64, max: f64, extent: f64) -> f64 {
    if max > min {
        (value - min) / (max - min) * extent
    } else {
        0.0
    }
}
