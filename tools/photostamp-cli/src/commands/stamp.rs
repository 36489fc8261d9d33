//! Stamp every photo in the source directory and package the results.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use photostamp_batch_pipeline::{BatchOutcome, BatchRunner, BatchSettings};
use photostamp_common::config::AppConfig;
use photostamp_common::error::PhotostampResult;
use photostamp_render_engine::stamper::RenderConfig;
use photostamp_sequence_model::sequencer::IncrementBounds;
use photostamp_sequence_model::timestamp::{parse_start_time, START_TIME_HINT};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Args, Debug, Clone)]
pub struct StampArgs {
    /// Start date time of the first photo (YYYY-MM-DD HH:MM:SS)
    #[arg(long = "sdt", value_name = START_TIME_HINT)]
    pub start: String,

    /// Minimum seconds added between consecutive photos [default: 5]
    #[arg(long = "min-sec", allow_negative_numbers = true)]
    pub min_sec: Option<i64>,

    /// Maximum seconds added between consecutive photos (exclusive) [default: 10]
    #[arg(long = "max-sec", allow_negative_numbers = true)]
    pub max_sec: Option<i64>,

    /// Directory with the photos to stamp [default: ./source]
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory receiving stamped photos and the archive [default: ./target]
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Seed for the increment generator, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Validate arguments against the loaded config. Touches no files.
pub fn resolve_settings(args: &StampArgs, config: &AppConfig) -> PhotostampResult<BatchSettings> {
    let start = parse_start_time(&args.start)?;
    let bounds = IncrementBounds::new(
        args.min_sec.unwrap_or(config.increments.min_secs),
        args.max_sec.unwrap_or(config.increments.max_secs),
    )?;

    Ok(BatchSettings {
        source_dir: args.source.clone().unwrap_or_else(|| config.source_dir.clone()),
        target_dir: args.target.clone().unwrap_or_else(|| config.target_dir.clone()),
        archive_name: config.archive_name.clone(),
        start,
        bounds,
    })
}

pub async fn run(args: StampArgs, config: AppConfig) -> anyhow::Result<()> {
    let settings = resolve_settings(&args, &config)?;
    let render = RenderConfig::from_defaults(&config.render)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    tracing::info!(
        source = %settings.source_dir.display(),
        target = %settings.target_dir.display(),
        start = %settings.start,
        min_secs = settings.bounds.min_secs(),
        max_secs = settings.bounds.max_secs(),
        seed = ?args.seed,
        "Starting batch"
    );

    let source_dir = settings.source_dir.clone();
    let runner = BatchRunner::new(settings, Arc::new(render));

    match runner.run(rng).await? {
        BatchOutcome::NoInput => {
            println!("Not found source files in {}", source_dir.display());
        }
        BatchOutcome::Packaged {
            archive, outputs, ..
        } => {
            tracing::info!(photos = outputs.len(), "Batch complete");
            println!("Success! Zip archive available in {}", archive.display());
        }
    }

    Ok(())
}
