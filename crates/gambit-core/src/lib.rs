//! Core types and traits for the Gambit URL shortener.
//!
//! This crate provides the record store contract and the shortener
//! contract shared by the storage backends, the shortener service and the
//! HTTP gateway. Sequence types are re-exported from `gambit_codec`.

pub mod error;
pub mod repository;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use gambit_codec::{Fingerprint, Sequence, SequenceCodec};
pub use repository::{ReadRepository, Repository, UrlRecord};
pub use shortener::{Availability, ExpirationPolicy, ShortenParams, Shortened, Shortener};
