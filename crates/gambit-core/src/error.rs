use gambit_codec::{CodecError, Sequence};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The sequence is already present. Stores report this atomically on insert.
    #[error("sequence already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors surfaced by a [`Shortener`](crate::Shortener).
#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid chess sequence: {0}")]
    InvalidSequence(#[from] CodecError),
    #[error("invalid expiration: {0}")]
    InvalidExpiration(String),
    #[error("chess sequence already taken: {sequence}")]
    SequenceTaken {
        sequence: Sequence,
        suggestions: Vec<Sequence>,
    },
    #[error("unable to generate a unique sequence after {attempts} retries")]
    ExhaustedRetries { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
