use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors produced by the sequence codec.
///
/// All of them are deterministic for a given input and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("invalid sequence length {found}; expected {min}..={max} moves")]
    InvalidLength { found: usize, min: usize, max: usize },
    #[error("unknown chess move: '{0}'")]
    UnknownToken(String),
    #[error("invalid codec settings: {0}")]
    InvalidSettings(String),
}
