use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use trackline_core::loading::stations::DEFAULT_CANVAS_SIZE;
use trackline_core::prelude::InputEvent;

#[derive(Debug, Parser)]
#[command(author, version, about = "Animate a train over a path network", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the animation loop and serve frames over HTTP.
    Serve {
        /// TOML configuration file. Defaults apply when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Listen address, overrides `[server] bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run a fixed number of ticks and print one JSON frame per line.
    Simulate {
        /// Network JSON file.
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value_t = 100)]
        ticks: u64,
        /// TOML configuration file, only `[train]` is used.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Input applied before a tick, as `TICK:EVENT` (e.g. `12:turn-right`).
        #[arg(short, long = "event")]
        events: Vec<ScheduledEvent>,
    },
    /// Convert a CSV of stations (`line,index,lat,long`) into network JSON.
    ImportStations {
        #[arg(long)]
        csv: PathBuf,
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
        width: f64,
        #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
        height: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub tick: u64,
    pub event: InputEvent,
}

impl FromStr for ScheduledEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tick, event) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TICK:EVENT, got '{s}'"))?;
        let tick = tick
            .trim()
            .parse()
            .map_err(|_| format!("invalid tick '{tick}'"))?;
        let event = event.trim().parse().map_err(|e| format!("{e}"))?;
        Ok(Self { tick, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_simulate_with_events() {
        let cli = Cli::try_parse_from([
            "trackline-server",
            "simulate",
            "--input",
            "net.json",
            "--ticks",
            "20",
            "-e",
            "3:turn-right",
            "-e",
            "7:backward",
        ])
        .unwrap();

        let Command::Simulate { ticks, events, .. } = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(ticks, 20);
        assert_eq!(
            events,
            vec![
                ScheduledEvent { tick: 3, event: InputEvent::TurnRight },
                ScheduledEvent { tick: 7, event: InputEvent::Backward },
            ]
        );
    }

    #[test]
    fn rejects_malformed_schedule() {
        assert!("turn-left".parse::<ScheduledEvent>().is_err());
        assert!("x:turn-left".parse::<ScheduledEvent>().is_err());
        assert!("4:jump".parse::<ScheduledEvent>().is_err());
    }

    #[test]
    fn import_defaults_to_square_canvas() {
        let cli = Cli::try_parse_from([
            "trackline-server",
            "import-stations",
            "--csv",
            "stations.csv",
            "--out",
            "net.json",
        ])
        .unwrap();
        let Command::ImportStations { width, height, .. } = cli.command else {
            panic!("expected import-stations");
        };
        assert_eq!(width, DEFAULT_CANVAS_SIZE);
        assert_eq!(height, DEFAULT_CANVAS_SIZE);
    }
}
