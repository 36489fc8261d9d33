//! Photostamp CLI — stamp a folder of photos with increasing timestamps.
//!
//! Usage:
//!   photostamp --sdt "2023-01-01 08:00:00" [--min-sec 5] [--max-sec 10]
//!
//! Photos are read from `./source`, stamped copies are written to
//! `./target`, and everything is bundled into `./target/photos.zip`.

use std::path::PathBuf;

use clap::Parser;
use photostamp_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "photostamp",
    about = "Stamp photos with synthetic, increasing timestamps and zip them",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/photostamp/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    stamp: commands::stamp::StampArgs,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    // Logging comes up before any config problem is reported, using the
    // file's logging section when it parsed.
    let base_logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    let logging =
        photostamp_common::logging::with_overrides(&base_logging, cli.verbose, cli.json_logs);
    photostamp_common::logging::init_logging(&logging);

    let config = match loaded {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            AppConfig::default()
        }
    };

    if let Err(e) = commands::stamp::run(cli.stamp, config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
