//! Logging and tracing initialization.
//!
//! Logs go to stderr so stdout only carries the user-facing result line.

use crate::config::LoggingConfig;

/// Apply command-line overrides on top of the configured logging settings.
pub fn with_overrides(config: &LoggingConfig, verbose: bool, json: bool) -> LoggingConfig {
    LoggingConfig {
        level: if verbose {
            "debug".to_string()
        } else {
            config.level.clone()
        },
        json: config.json || json,
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level`. Calling this twice is
/// harmless; the first subscriber stays installed.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().try_init().ok();
    } else {
        builder
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .try_init()
            .ok();
    }
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}
