//! Synthetic, monotonically increasing capture times.
//!
//! Each photo is stamped `r` seconds after the previous one (the first one
//! `r` seconds after the start time), where `r` is drawn independently and
//! uniformly from the half-open range `[min, max)`. When `min == max` the
//! step is constant and no draw is made.

use chrono::{NaiveDateTime, TimeDelta};
use photostamp_common::error::{PhotostampError, PhotostampResult};
use rand::Rng;

use crate::batch::{InputFile, TimestampAssignment};

/// Validated bounds for the per-photo increment, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementBounds {
    min_secs: u64,
    max_secs: u64,
}

impl IncrementBounds {
    /// Validate raw bounds as given by the user.
    ///
    /// Both values must be non-negative and `min <= max`.
    pub fn new(min_secs: i64, max_secs: i64) -> PhotostampResult<Self> {
        if min_secs < 0 || max_secs < 0 {
            return Err(PhotostampError::config(format!(
                "increment bounds must not be negative (min {min_secs}, max {max_secs})"
            )));
        }
        if min_secs > max_secs {
            return Err(PhotostampError::config(format!(
                "minimum increment {min_secs}s is greater than maximum {max_secs}s"
            )));
        }
        Ok(Self {
            min_secs: min_secs as u64,
            max_secs: max_secs as u64,
        })
    }

    pub fn min_secs(&self) -> u64 {
        self.min_secs
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Draw one increment from `[min, max)`, or exactly `min` when the
    /// range is degenerate.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u64 {
        if self.max_secs <= self.min_secs {
            return self.min_secs;
        }
        rng.random_range(self.min_secs..self.max_secs)
    }
}

/// Generates the timestamp sequence for one batch.
#[derive(Debug)]
pub struct TimeSequencer<R> {
    current: NaiveDateTime,
    bounds: IncrementBounds,
    rng: R,
}

impl<R: Rng> TimeSequencer<R> {
    /// Create a sequencer starting at `start`; the first timestamp produced
    /// is already one increment after it.
    pub fn new(start: NaiveDateTime, bounds: IncrementBounds, rng: R) -> Self {
        Self {
            current: start,
            bounds,
            rng,
        }
    }

    /// Advance by one random increment and return the new timestamp.
    pub fn next_timestamp(&mut self) -> PhotostampResult<NaiveDateTime> {
        let step = self.bounds.draw(&mut self.rng);
        let next = i64::try_from(step)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|delta| self.current.checked_add_signed(delta))
            .ok_or_else(|| {
                PhotostampError::config(format!(
                    "adding {step}s to {} leaves the supported date range",
                    self.current
                ))
            })?;
        self.current = next;
        Ok(next)
    }

    /// Assign a timestamp to every file, in the order given.
    pub fn assign(&mut self, files: &[InputFile]) -> PhotostampResult<Vec<TimestampAssignment>> {
        let mut assignments = Vec::with_capacity(files.len());
        for file in files {
            let timestamp = self.next_timestamp()?;
            tracing::debug!(file = file.name(), %timestamp, "Assigned timestamp");
            assignments.push(TimestampAssignment {
                file: file.clone(),
                timestamp,
            });
        }
        Ok(assignments)
    }

    /// The most recently produced timestamp (the start time before any draw).
    pub fn current(&self) -> NaiveDateTime {
        self.current
    }
}
