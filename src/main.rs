//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `atlas_gelf` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use atlas_gelf::cli::{Cli, USAGE};
use atlas_gelf::initialization::init_logger_with;
use atlas_gelf::{Config, MeasurementPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args_os().len() <= 1 {
        println!("{USAGE}");
        process::exit(1);
    }
    let cli = Cli::parse();

    // Try the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("atlas_gelf error: {e}");
            process::exit(1);
        }
    };

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let pipeline = match MeasurementPipeline::new(&config).await {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("atlas_gelf error: {:#}", e);
            process::exit(1);
        }
    };

    let outcome = pipeline.run(cli.measurement_id, cli.minutes).await;
    pipeline.close().await;

    match outcome {
        Ok(report) => {
            println!("✅ {}", report.summary());
            Ok(())
        }
        Err(e) => {
            eprintln!("atlas_gelf error: {:#}", e);
            process::exit(1);
        }
    }
}
