use std::path::PathBuf;

use flopbot_engine::errors::GameError;
use thiserror::Error;

/// Failures reading or writing learned tables.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("zstd error on {}: {source}", path.display())]
    Compression {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode table: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to parse table: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("Invalid table contents: {0}")]
    Invalid(String),
    #[error("Corrupt artifact {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: Box<StorageError>,
    },
}

/// Anything that ends a training run.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Cannot sample an action at {key}: {reason}")]
    Sampling { key: String, reason: String },
    #[error("No legal actions at {0}")]
    NoLegalActions(String),
    #[error("Invalid training parameter: {0}")]
    InvalidParameter(String),
}
