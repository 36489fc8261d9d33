//! Error types shared across Photostamp crates.

use std::path::PathBuf;

/// Top-level error type for Photostamp operations.
#[derive(Debug, thiserror::Error)]
pub enum PhotostampError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Cannot decode {file}: {message}")]
    Decode { file: String, message: String },

    #[error("Font error: {message}")]
    Font { message: String },

    #[error("Cannot encode {file}: {message}")]
    Encode { file: String, message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Inputs {first} and {second} would both be written as {output}")]
    OutputCollision {
        first: String,
        second: String,
        output: String,
    },

    #[error("{} photo(s) failed to stamp: {}", .failures.len(), summarize(.failures))]
    Batch { failures: Vec<FileFailure> },
}

/// One worker's failure inside a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Input file name.
    pub file: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Result type alias using PhotostampError.
pub type PhotostampResult<T> = Result<T, PhotostampError>;

impl PhotostampError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(file: impl Into<String>, msg: impl ToString) -> Self {
        Self::Decode {
            file: file.into(),
            message: msg.to_string(),
        }
    }

    pub fn encode(file: impl Into<String>, msg: impl ToString) -> Self {
        Self::Encode {
            file: file.into(),
            message: msg.to_string(),
        }
    }

    pub fn font(msg: impl ToString) -> Self {
        Self::Font {
            message: msg.to_string(),
        }
    }

    pub fn archive(msg: impl ToString) -> Self {
        Self::Archive {
            message: msg.to_string(),
        }
    }
}

fn summarize(failures: &[FileFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.file, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
