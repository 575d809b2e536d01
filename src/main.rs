//! CLI entry point for pdfgrab.

use anyhow::Result;
use clap::Parser;
use pdfgrab_core::{HttpClient, Pipeline};
use tracing::{debug, error, info};

mod app_config;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Config is loaded before tracing because it can set the default verbosity.
    let file_config = app_config::load_file_config(args.config.as_deref())?;
    let settings = app_config::merge(&args, file_config);

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => settings
                .verbosity
                .map_or("info", app_config::VerbositySetting::filter_directive),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    debug!(?settings, "settings resolved");
    info!(url = %settings.request.url, "pdfgrab starting");

    let client = match HttpClient::with_settings(&settings.client) {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            return Ok(());
        }
    };

    // Every run-level failure has already been reported; the process still exits 0.
    let summary = Pipeline::new(client).run(&settings.request).await;
    debug!(status = ?summary.status, "run finished");

    Ok(())
}
