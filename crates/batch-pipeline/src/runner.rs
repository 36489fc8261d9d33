//! Batch orchestration: sweep, enumerate, assign, fan out, join, package.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDateTime;
use photostamp_common::error::{FileFailure, PhotostampError, PhotostampResult};
use photostamp_render_engine::stamper::{stamp_file, RenderConfig};
use photostamp_sequence_model::batch::{check_output_collisions, OutputFile, TimestampAssignment};
use photostamp_sequence_model::sequencer::{IncrementBounds, TimeSequencer};
use rand::Rng;
use tokio::task::JoinHandle;

use crate::packager::package;
use crate::workspace::{clear_target, enumerate_inputs};

/// Inputs of one batch run, fully validated.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Directory holding the photos to stamp.
    pub source_dir: PathBuf,

    /// Directory receiving outputs and the archive.
    pub target_dir: PathBuf,

    /// Archive file name inside `target_dir`.
    pub archive_name: String,

    /// Time the sequence starts from (the first photo is one increment later).
    pub start: NaiveDateTime,

    /// Per-photo increment bounds.
    pub bounds: IncrementBounds,
}

/// Stages of a batch run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStage {
    Init,
    Cleared,
    Enumerated,
    Dispatched,
    Joined,
    Packaged,
    Done,
}

/// How a successful batch run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The source directory held no photos; nothing was written.
    NoInput,

    /// Every photo was stamped and the archive was written.
    Packaged {
        archive: PathBuf,
        assignments: Vec<TimestampAssignment>,
        outputs: Vec<OutputFile>,
    },
}

/// Runs one batch with a shared, read-only render configuration.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    settings: BatchSettings,
    render: Arc<RenderConfig>,
}

impl BatchRunner {
    pub fn new(settings: BatchSettings, render: Arc<RenderConfig>) -> Self {
        Self { settings, render }
    }

    /// Execute the batch.
    ///
    /// `rng` drives the increments; pass a seeded generator for
    /// reproducible timestamps.
    pub async fn run<R: Rng>(&self, rng: R) -> PhotostampResult<BatchOutcome> {
        let settings = &self.settings;
        log_stage(BatchStage::Init);

        let removed = clear_target(&settings.target_dir)?;
        tracing::info!(removed, dir = %settings.target_dir.display(), "Target swept");
        log_stage(BatchStage::Cleared);

        let inputs = enumerate_inputs(&settings.source_dir)?;
        log_stage(BatchStage::Enumerated);
        if inputs.is_empty() {
            tracing::info!(dir = %settings.source_dir.display(), "No input photos found");
            log_stage(BatchStage::Done);
            return Ok(BatchOutcome::NoInput);
        }
        check_output_collisions(&inputs)?;

        let assignments = TimeSequencer::new(settings.start, settings.bounds, rng).assign(&inputs)?;
        if let (Some(first), Some(last)) = (assignments.first(), assignments.last()) {
            tracing::info!(
                photos = assignments.len(),
                first = %first.timestamp,
                last = %last.timestamp,
                "Assigned timestamps"
            );
        }

        let handles = self.dispatch(&assignments);
        log_stage(BatchStage::Dispatched);

        let outputs = join_workers(handles).await?;
        log_stage(BatchStage::Joined);

        let target_dir = settings.target_dir.clone();
        let archive_name = settings.archive_name.clone();
        let archive = tokio::task::spawn_blocking(move || {
            package(&target_dir, &archive_name, &inputs)
        })
        .await
        .map_err(|e| PhotostampError::archive(format!("packaging task failed: {e}")))??;
        log_stage(BatchStage::Packaged);

        log_stage(BatchStage::Done);
        Ok(BatchOutcome::Packaged {
            archive,
            assignments,
            outputs,
        })
    }

    /// Spawn one worker per assignment. Each worker owns its inputs and
    /// shares only the render config.
    fn dispatch(
        &self,
        assignments: &[TimestampAssignment],
    ) -> Vec<(String, JoinHandle<PhotostampResult<OutputFile>>)> {
        assignments
            .iter()
            .map(|assignment| {
                let file = assignment.file.name().to_string();
                let assignment = assignment.clone();
                let render = Arc::clone(&self.render);
                let source_dir = self.settings.source_dir.clone();
                let target_dir = self.settings.target_dir.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    stamp_file(&source_dir, &target_dir, &assignment, &render)
                });
                (file, handle)
            })
            .collect()
    }
}

/// Join barrier: wait for every worker and collect its outcome.
///
/// All handles are awaited even after a failure, so no worker is left
/// writing while the caller moves on.
async fn join_workers(
    handles: Vec<(String, JoinHandle<PhotostampResult<OutputFile>>)>,
) -> PhotostampResult<Vec<OutputFile>> {
    let mut outputs = Vec::with_capacity(handles.len());
    let mut failures = Vec::new();

    for (file, handle) in handles {
        match handle.await {
            Ok(Ok(output)) => outputs.push(output),
            Ok(Err(e)) => {
                tracing::warn!(file = %file, error = %e, "Stamping failed");
                failures.push(FileFailure {
                    file,
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(file = %file, error = %e, "Stamping worker aborted");
                failures.push(FileFailure {
                    file,
                    reason: format!("worker aborted: {e}"),
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(outputs)
    } else {
        Err(PhotostampError::Batch { failures })
    }
}

fn log_stage(stage: BatchStage) {
    tracing::debug!(?stage, "Batch stage");
}
