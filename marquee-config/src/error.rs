use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load features from {origin}: {source:#}")]
    Source {
        origin: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("invalid value '{value}' for {name}")]
    InvalidOverride { name: &'static str, value: String },
    #[error("invalid duration '{value}' for {field}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("skip_interval_ms must be greater than zero")]
    ZeroSkipInterval,
    #[error(
        "buffering_stall_timeout must be greater than zero (use \"off\" to disable)"
    )]
    ZeroStallTimeout,
    #[error("failed to read env file {path}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
