use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastHelper, Notification, Units, provider};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tracing::{info, warn};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast-helper", version, about = "Forecast helper backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve forecast requests over stdin/stdout notification frames.
    Run,

    /// Interactively edit the stored request defaults.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Run => serve().await,
            Command::Configure => configure(),
        }
    }
}

/// Bridge the helper to the host process: one JSON notification frame per
/// line, requests in on stdin, responses out on stdout. Returns when stdin
/// reaches EOF and all in-flight responses have been written.
async fn serve() -> Result<()> {
    let config = Config::load()?;
    let provider = Arc::new(provider::provider_from_config(&config));

    let (in_tx, in_rx) = mpsc::channel(32);
    let (out_tx, mut out_rx) = mpsc::channel(32);
    tokio::spawn(ForecastHelper::new(provider, config, out_tx).run(in_rx));

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(notification) = out_rx.recv().await {
            match serde_json::to_string(&notification) {
                Ok(mut line) => {
                    line.push('\n');
                    if stdout.write_all(line.as_bytes()).await.is_err() {
                        break;
                    }
                    let _ = stdout.flush().await;
                }
                Err(err) => warn!("failed to encode outbound notification: {err}"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read notification frame from stdin")?
    {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Notification>(&line) {
            Ok(notification) => {
                if in_tx.send(notification).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!("skipping undecodable notification frame: {err}"),
        }
    }

    // Closing the inbound channel stops the helper; the writer drains once
    // the last in-flight fetch drops its outbound sender.
    drop(in_tx);
    info!("stdin closed, shutting down");
    writer.await.context("Outbound writer task failed")?;

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let current = config.units.unwrap_or_default();
    let cursor = Units::all()
        .iter()
        .position(|u| *u == current)
        .unwrap_or(0);
    let units = inquire::Select::new("Default units:", Units::all().to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Units selection cancelled")?;

    let language = inquire::Text::new("Default language code:")
        .with_initial_value(config.language.as_deref().unwrap_or("en"))
        .prompt()
        .context("Language prompt cancelled")?;

    let base_url = inquire::Text::new("Provider base URL (leave empty for the public API):")
        .with_initial_value(config.base_url.as_deref().unwrap_or(""))
        .prompt()
        .context("Base URL prompt cancelled")?;

    config.units = Some(units);
    config.language = Some(language.trim().to_string()).filter(|l| !l.is_empty());
    config.base_url = Some(base_url.trim().to_string()).filter(|u| !u.is_empty());
    config.save()?;

    println!("Saved defaults to {}", Config::config_file_path()?.display());
    Ok(())
}
