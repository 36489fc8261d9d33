//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PhotostampError, PhotostampResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the photos to stamp.
    pub source_dir: PathBuf,

    /// Directory receiving stamped photos and the archive. Swept on every run.
    pub target_dir: PathBuf,

    /// File name of the archive written into `target_dir`.
    pub archive_name: String,

    /// Timestamp overlay settings.
    pub render: RenderDefaults,

    /// Default bounds for the per-photo time increment.
    pub increments: IncrementDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Overlay layout and output encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Font size as a fraction of image height.
    pub font_size_ratio: f32,

    /// Left edge of the text as a fraction of image width.
    pub anchor_x_ratio: f32,

    /// Distance from the bottom edge to the text baseline, in pixels.
    pub bottom_margin_px: u32,

    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

/// Increment bounds in whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncrementDefaults {
    pub min_secs: i64,
    pub max_secs: i64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "photostamp=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./source"),
            target_dir: PathBuf::from("./target"),
            archive_name: "photos.zip".to_string(),
            render: RenderDefaults::default(),
            increments: IncrementDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            font_size_ratio: 0.04,
            anchor_x_ratio: 0.7,
            bottom_margin_px: 20,
            jpeg_quality: 100,
        }
    }
}

impl Default for IncrementDefaults {
    fn default() -> Self {
        Self {
            min_secs: 5,
            max_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error, so the caller can report it once logging
    /// is up.
    pub fn load() -> PhotostampResult<Self> {
        let path = config_file_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(config_path: &Path) -> PhotostampResult<Self> {
        if !config_path.exists() {
            return Err(PhotostampError::config(format!(
                "Config file {} does not exist",
                config_path.display()
            )));
        }
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            PhotostampError::config(format!(
                "Failed to read config at {}: {e}",
                config_path.display()
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PhotostampError::config(format!(
                "Failed to parse config at {}: {e}",
                config_path.display()
            ))
        })
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("photostamp").join("config.json")
}
