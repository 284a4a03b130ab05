use crate::repository::UrlRecord;
use async_trait::async_trait;
use gambit_codec::{CodecStats, Sequence};
use jiff::Timestamp;
use serde::Serialize;
use std::time::Duration;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Expiration policy for a shortened URL.
#[derive(Debug, Clone, Default)]
pub enum ExpirationPolicy {
    /// The shortened URL never expires.
    #[default]
    Never,
    /// The shortened URL expires after a certain duration from now.
    AfterDuration(Duration),
    /// The shortened URL expires at a specific timestamp.
    AtTimestamp(Timestamp),
}

/// Parameters for creating a shortened URL.
#[derive(Debug, Clone, Default)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// The expiration policy for the shortened URL.
    pub expiration: ExpirationPolicy,
    /// Optional user-chosen sequence, validated against the vocabulary.
    pub custom_sequence: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Optional cap on the number of redirects.
    pub max_visits: Option<u64>,
}

impl ShortenParams {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            ..Self::default()
        }
    }
}

/// A newly stored short link.
#[derive(Debug, Clone)]
pub struct Shortened {
    pub sequence: Sequence,
    pub record: UrlRecord,
}

/// Outcome of checking whether a sequence can be claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub sequence: String,
    pub valid: bool,
    /// Only known for valid sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores a new short link and returns the sequence it was stored under.
    async fn shorten(&self, params: ShortenParams) -> Result<Shortened>;

    /// Looks up a live record without counting a visit.
    /// Returns `None` if the sequence does not exist, has expired or is
    /// out of visits.
    async fn resolve(&self, sequence: &Sequence) -> Result<Option<UrlRecord>>;

    /// Looks up a live record and counts one visit against it.
    async fn visit(&self, sequence: &Sequence) -> Result<Option<UrlRecord>>;

    /// Deletes a shortened URL by its sequence.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, sequence: &Sequence) -> Result<bool>;

    /// Validates raw user input and reports whether it is still free.
    async fn check_availability(&self, raw: &str) -> Result<Availability>;

    /// Figures about the encoding space.
    fn stats(&self) -> CodecStats;

    /// Parses raw input into a sequence using the service's codec.
    fn parse_sequence(&self, raw: &str) -> Result<Sequence>;
}
