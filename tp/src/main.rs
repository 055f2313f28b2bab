//! Trip Planner CLI entry point
//!
//! Launches the interactive form by default, or runs a one-shot plan or
//! download from the command line.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use tripplanner::cli::{Cli, Command};
use tripplanner::config::Config;
use tripplanner::download::{default_destination, download_artifact};
use tripplanner::render::render_text;
use tripplanner::{ArtifactReference, HttpPlanningClient, Planner, PlanningService, RequestState};

fn parse_level(level_str: Option<&str>) -> tracing::Level {
    match level_str.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // The TUI owns stdout, so logs always go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = parse_level(cli_log_level.or(config_log_level));

    let log_file = fs::File::create(log_dir.join("tripplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_base_url(cli.base_url);
    info!("Trip planner using service at {}", config.service.base_url);

    let client = HttpPlanningClient::from_config(&config.service).context("Failed to create HTTP client")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan { city, download }) => cmd_plan(&config, &client, &city, download).await,
        Some(Command::Download { kml_path, output }) => cmd_download(&config, &client, &kml_path, output).await,
        None => {
            debug!("main: no command specified, launching TUI");
            tripplanner::tui::run(Arc::new(client), config.download.dir.clone()).await
        }
    }
}

/// Plan a trip and print the itinerary
async fn cmd_plan(config: &Config, client: &HttpPlanningClient, city: &str, download: bool) -> Result<()> {
    debug!(%city, download, "cmd_plan: called");
    let mut planner = Planner::new();
    let state = planner.plan(client, city).await.clone();

    let text = render_text(&state, planner.query(), client.base_url());
    match &state {
        RequestState::Failed(_) => {
            eprint!("{}", text.red());
            std::process::exit(1);
        }
        _ => print!("{}", text),
    }

    if download && let Some(artifact) = state.artifact() {
        let dest = default_destination(&config.download.dir, artifact);
        save(client, artifact, dest).await?;
    }
    Ok(())
}

/// Download an artifact by its server-relative path
async fn cmd_download(
    config: &Config,
    client: &HttpPlanningClient,
    kml_path: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    debug!(%kml_path, ?output, "cmd_download: called");
    let artifact = ArtifactReference::from_path(Some(kml_path.to_string()))
        .ok_or_else(|| eyre::eyre!("KML path must not be empty"))?;
    let dest = output.unwrap_or_else(|| default_destination(&config.download.dir, &artifact));
    save(client, &artifact, dest).await
}

async fn save(client: &HttpPlanningClient, artifact: &ArtifactReference, dest: PathBuf) -> Result<()> {
    let bytes = download_artifact(client, artifact, &dest)
        .await
        .context(format!("Failed to download {}", artifact.resolve(client.base_url())))?;
    println!("{} Saved {} bytes to {}", "✓".green(), bytes, dest.display().to_string().cyan());
    Ok(())
}
