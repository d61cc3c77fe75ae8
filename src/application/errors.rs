//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),
}

/// Command parse errors
///
/// One variant per recoverable parse failure, so the failure modes are
/// enumerable. These never propagate past the command handler; each maps
/// to a fixed user-facing usage reply with no state change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("add takes exactly 3 arguments, got {got}")]
    AddUsage { got: usize },

    #[error("delete takes exactly 1 argument, got {got}")]
    DeleteUsage { got: usize },
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),
}
