//! Gaze selection demo
//!
//! Usage:
//!   gaze-demo                       # defaults, 8 items
//!   gaze-demo --items 12            # longer list
//!   gaze-demo --config gaze.toml    # explicit config file
//!   gaze-demo --log-file demo.log   # RUST_LOG=debug for state transitions

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use gaze_pick_config::GazeConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gaze-demo", version, about = "Dwell on a row with your gaze, blink to select it")]
struct Args {
    /// Config file (defaults to the platform config dir, then built-in values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of list items
    #[arg(short = 'n', long, default_value_t = 8)]
    items: usize,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let config = GazeConfig::load_or_default(args.config.as_deref())
        .context("loading gaze configuration")?;

    gaze_pick_app::run_demo(config, args.items).await
}
