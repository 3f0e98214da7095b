use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid board geometry: {0}")]
    InvalidGrid(String),
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// A named asset that could not be resolved.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing sprite asset `{0}`")]
    MissingSprite(String),
    #[error("missing sound asset `{0}`")]
    MissingSound(String),
    #[error("asset `{name}` has invalid color `{value}`")]
    InvalidColor { name: String, value: String },
    #[error("failed to load asset manifest {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },
}

/// Startup failures that abort before the game loop runs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
