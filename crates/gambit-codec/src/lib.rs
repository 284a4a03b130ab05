//! Chess move sequence codec.
//!
//! Turns URLs into short, memorable sequences such as `e4.Nf3.d4.exd5.O-O`
//! and decodes sequences back into their integer fingerprint. The codec is
//! pure: it never performs I/O and holds no mutable state.

mod codec;
pub mod error;
mod fingerprint;
mod sequence;
pub mod settings;
mod stats;
pub mod vocabulary;

pub use codec::SequenceCodec;
pub use error::{CodecError, Result};
pub use fingerprint::Fingerprint;
pub use sequence::Sequence;
pub use settings::{
    CodecSettings, DEFAULT_SEPARATOR, DEFAULT_SEQUENCE_LENGTH, MAX_SEQUENCE_LENGTH,
    MIN_SEQUENCE_LENGTH,
};
pub use stats::CodecStats;
pub use vocabulary::{Vocabulary, CANONICAL_MOVES};
