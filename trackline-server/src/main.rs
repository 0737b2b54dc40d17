mod animation;
mod cli;
mod config;
mod error;
mod routes;

use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trackline_core::prelude::*;

use crate::cli::{Cli, Command, ScheduledEvent};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes::{AppState, NetworkSummary};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve { config, bind } => serve(config.as_deref(), bind).await,
        Command::Simulate {
            input,
            ticks,
            config,
            events,
        } => simulate(&input, ticks, config.as_deref(), &events),
        Command::ImportStations {
            csv,
            out,
            width,
            height,
        } => import(&csv, &out, width, height),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn read_config(path: Option<&Path>) -> Result<ServerConfig, ServerError> {
    match path {
        Some(path) => ServerConfig::load(path),
        None => Ok(ServerConfig::default()),
    }
}

async fn serve(
    config: Option<&Path>,
    bind: Option<std::net::SocketAddr>,
) -> Result<(), ServerError> {
    let mut config = read_config(config)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let graph = Arc::new(load_network(&config.network)?);
    let summary = NetworkSummary::of(&graph);
    info!(
        paths = summary.paths,
        links = summary.links,
        input = %config.network.input.display(),
        "network loaded"
    );

    let simulation = Simulation::from_config(graph, &config.train)?;
    let animation = animation::spawn(
        simulation,
        config.server.tick_hz,
        config.server.event_buffer,
    );

    let state = AppState {
        events: animation.events,
        frames: animation.frames,
        network: Arc::new(summary),
    };
    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(config.server.bind).await?;
    info!(addr = %config.server.bind, tick_hz = config.server.tick_hz, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last event sender, so the loop winds down on its own.
    let _ = animation.task.await;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {e}");
    }
}

fn simulate(
    input: &Path,
    ticks: u64,
    config: Option<&Path>,
    events: &[ScheduledEvent],
) -> Result<(), ServerError> {
    let config = read_config(config)?;
    let network = NetworkConfig {
        input: input.to_path_buf(),
    };
    let graph = Arc::new(load_network(&network)?);
    let mut simulation = Simulation::from_config(graph, &config.train)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for tick in 0..ticks {
        for scheduled in events.iter().filter(|scheduled| scheduled.tick == tick) {
            simulation.push_event(scheduled.event);
        }
        let frame = simulation.step();
        serde_json::to_writer(&mut out, &frame)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn import(csv: &Path, out: &Path, width: f64, height: f64) -> Result<(), ServerError> {
    let network = import_stations_file(csv, width, height)?;
    std::fs::write(out, network.to_json_string()?)?;
    info!(
        paths = network.paths.len(),
        connections = network.connections.len(),
        out = %out.display(),
        "stations imported"
    );
    Ok(())
}
