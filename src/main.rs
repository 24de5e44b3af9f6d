use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod display;
mod error;
mod logger;
mod sample;
mod sink;
mod source;

use display::{Console, Silent};
use logger::{Authorization, LocationLogger};
use sink::LogFile;
use source::{CsvSource, SubscriptionRequest};

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Subscribe to position updates and append each reading to the log.
    Run,
    /// Truncate the location log.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let path = match cli.config.as_deref() {
        Some(x) => x,
        None => Path::new("config.toml"),
    };
    let config = config::load(path)?;

    match cli.command {
        Command::Run => {
            let mut logger = LocationLogger::new(
                CsvSource::new(&config.track_path),
                LogFile::new(&config.log_path),
                Console,
            );

            // Consent lives outside this process; invoking `run` is the grant.
            let auth = Authorization::granted();
            let request = SubscriptionRequest {
                min_interval: Duration::from_millis(config.interval_ms),
                accuracy: config.accuracy,
            };
            logger.start(auth, request)?;
            tokio::select! {
                _ = logger.run() => info!("position source ended"),
                _ = signal::ctrl_c() => info!("shutting down"),
            }
            logger.stop();
        }

        Command::Clear => {
            let mut logger = LocationLogger::new(
                CsvSource::new(&config.track_path),
                LogFile::new(&config.log_path),
                Silent,
            );
            logger.clear_log().context("Failed to clear the log file")?;
        }
    };

    Ok(())
}
