//! Source and target directory handling.

use std::io::ErrorKind;
use std::path::Path;

use photostamp_common::error::{PhotostampError, PhotostampResult};
use photostamp_sequence_model::batch::InputFile;
use photostamp_sequence_model::naming::is_hidden;

/// Remove every previous output from `target_dir`.
///
/// Hidden entries (such as a `.gitkeep` placeholder) and subdirectories are
/// left alone. A file disappearing while the sweep runs is not an error. A
/// missing target directory is created. Returns the number of files removed.
pub fn clear_target(target_dir: &Path) -> PhotostampResult<usize> {
    let entries = match std::fs::read_dir(target_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            std::fs::create_dir_all(target_dir).map_err(|e| PhotostampError::io(target_dir, e))?;
            tracing::info!(dir = %target_dir.display(), "Created target directory");
            return Ok(0);
        }
        Err(e) => return Err(PhotostampError::io(target_dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| PhotostampError::io(target_dir, e))?;
        let path = entry.path();

        if entry.file_name().to_str().is_some_and(is_hidden) {
            continue;
        }
        let file_type = entry.file_type().map_err(|e| PhotostampError::io(&path, e))?;
        if file_type.is_dir() {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(PhotostampError::io(&path, e)),
        }
    }

    tracing::debug!(dir = %target_dir.display(), removed, "Cleared target directory");
    Ok(removed)
}

/// List the photos in `source_dir`, sorted by file name.
///
/// Only regular files (symlinks followed) are returned; subdirectories,
/// hidden entries and names that are not valid UTF-8 are skipped.
pub fn enumerate_inputs(source_dir: &Path) -> PhotostampResult<Vec<InputFile>> {
    let entries = std::fs::read_dir(source_dir).map_err(|e| PhotostampError::io(source_dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PhotostampError::io(source_dir, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %path.display(), "Skipping file with non UTF-8 name");
            continue;
        };
        if name.is_empty() || is_hidden(&name) {
            continue;
        }

        let metadata = std::fs::metadata(&path).map_err(|e| PhotostampError::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }
        names.push(name);
    }

    names.sort();
    tracing::debug!(dir = %source_dir.display(), count = names.len(), "Enumerated inputs");
    Ok(names.into_iter().map(InputFile::new).collect())
}
