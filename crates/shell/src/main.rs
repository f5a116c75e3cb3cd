mod app;
mod input;

use std::{
    fs::{self, OpenOptions},
    process::ExitCode,
    sync::Mutex,
};

use anyhow::{Context, Result};
use sll_core::config::{self, AppConfig};
use tokio::io::{self, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::app::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let (config, problems) = config::load_or_default();
    if let Err(err) = init_logging(&config) {
        eprintln!("sll: logging disabled: {err:#}");
    }
    for problem in &problems {
        eprintln!("sll: configuration problem, continuing: {problem:#}");
        warn!("configuration problem: {problem:#}");
    }

    let mut shell = Shell::new(BufReader::new(io::stdin()), io::stdout(), config.clone());
    let exit = shell.run().await?;
    info!(?exit, nodes = shell.list().length(), "session ended");

    Ok(ExitCode::from(exit.exit_code(&config)))
}

// Stdout carries the operator transcript, so logs only go to the file.
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_dir = config.log_dir()?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("sll.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
