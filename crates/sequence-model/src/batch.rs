//! Batch data: the photos of one run and what each one is stamped with.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use photostamp_common::error::{PhotostampError, PhotostampResult};

use crate::naming::output_name;
use crate::timestamp::format_stamp;

/// A photo found in the source directory, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFile {
    name: String,
}

impl InputFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// File name including its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the stamped file this input produces.
    pub fn output_name(&self) -> String {
        output_name(&self.name)
    }

    /// Full path of this input inside `source_dir`.
    pub fn path_in(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.name)
    }
}

/// An input file paired with the time drawn onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampAssignment {
    pub file: InputFile,
    pub timestamp: NaiveDateTime,
}

impl TimestampAssignment {
    /// Overlay text for this photo.
    pub fn stamp_text(&self) -> String {
        format_stamp(&self.timestamp)
    }
}

/// A stamped photo written to the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Output file name (`<base>.jpg`).
    pub name: String,
    /// Full path on disk.
    pub path: PathBuf,
}

/// Reject batches where two inputs map to the same output name.
///
/// `a.png` and `a.jpeg` would both be written as `a.jpg` by concurrent
/// workers, so the batch is refused before anything is dispatched.
pub fn check_output_collisions(inputs: &[InputFile]) -> PhotostampResult<()> {
    let mut seen: HashMap<String, &InputFile> = HashMap::with_capacity(inputs.len());
    for input in inputs {
        let output = input.output_name();
        if let Some(first) = seen.get(&output) {
            return Err(PhotostampError::OutputCollision {
                first: first.name().to_string(),
                second: input.name().to_string(),
                output,
            });
        }
        seen.insert(output, input);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_file_paths() {
        let input = InputFile::new("trip.day1.png");
        assert_eq!(input.output_name(), "trip.day1.jpg");
        assert_eq!(
            input.path_in(Path::new("source")),
            PathBuf::from("source/trip.day1.png")
        );
    }

    #[test]
    fn test_distinct_outputs_pass() {
        let inputs = vec![InputFile::new("a.png"), InputFile::new("b.png")];
        assert!(check_output_collisions(&inputs).is_ok());
    }

    #[test]
    fn test_colliding_outputs_rejected() {
        let inputs = vec![
            InputFile::new("a.png"),
            InputFile::new("b.png"),
            InputFile::new("a.jpeg"),
        ];
        match check_output_collisions(&inputs) {
            Err(PhotostampError::OutputCollision {
                first,
                second,
                output,
            }) => {
                assert_eq!(first, "a.png");
                assert_eq!(second, "a.jpeg");
                assert_eq!(output, "a.jpg");
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }
}
