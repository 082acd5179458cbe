//! Error types for the CLI application.
//!
//! Library errors from the engine and the training crate are folded into
//! [`CliError`] so command handlers can propagate everything with `?`.

use std::fmt;

use flopbot_ai::{StorageError, TrainError};
use flopbot_engine::errors::GameError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(ConfigError),

    /// Rule violation reported by the game engine
    Engine(GameError),

    /// Reading or writing learned tables failed
    Storage(StorageError),

    /// Training stopped on an error
    Training(TrainError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Storage(e) => write!(f, "Storage error: {}", e),
            CliError::Training(e) => write!(f, "Training error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Engine(e) => Some(e),
            CliError::Storage(e) => Some(e),
            CliError::Training(e) => Some(e),
            CliError::InvalidInput(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<StorageError> for CliError {
    fn from(error: StorageError) -> Self {
        CliError::Storage(error)
    }
}

impl From<TrainError> for CliError {
    fn from(error: TrainError) -> Self {
        CliError::Training(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}
