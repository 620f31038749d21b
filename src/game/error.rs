//! Error types for the Atlas game.
//!
//! Every validation error is recoverable: the route layer turns it into the
//! banner shown above the places list and the same player is asked again.

use thiserror::Error;

/// Why a submitted place name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input was blank after trimming.
    #[error("Please enter a place name")]
    EmptyInput,
    /// The (case-insensitive) name was already played this round.
    #[error("This place has already been used!")]
    DuplicateEntry { name: String },
    /// First letter does not continue the chain.
    #[error("Place name must start with '{expected}'")]
    ChainMismatch { expected: char },
    /// The round has ended; only a reset starts a new one.
    #[error("The game is over. Reset to start a new round")]
    GameFinished,
}

/// A persisted snapshot could not be decoded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("corrupt atlas snapshot: {0}")]
    CorruptState(#[from] serde_json::Error),
}

/// Rejected game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("player count must be 1 or 2, got {0}")]
    PlayerCount(u8),
    #[error("{field} must be a positive number, got '{value}'")]
    NotPositive { field: &'static str, value: String },
    #[error("storage key must not be empty")]
    EmptyStorageKey,
}
