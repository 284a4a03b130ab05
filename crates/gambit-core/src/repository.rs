use crate::error::StorageError;
use async_trait::async_trait;
use gambit_codec::{Fingerprint, Sequence};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored mapping from a sequence to its destination URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    #[builder(setter(into))]
    pub original_url: String,
    /// The decoded value of the sequence this record is stored under.
    pub fingerprint: Fingerprint,
    /// Whether the sequence was chosen by the user rather than generated.
    #[builder(default)]
    pub custom: bool,
    #[builder(default, setter(strip_option, into))]
    pub title: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default = Timestamp::now())]
    pub created_at: Timestamp,
    /// When the record expires, if ever.
    #[builder(default)]
    pub expire_at: Option<Timestamp>,
    /// Number of redirects allowed, if capped.
    #[builder(default)]
    pub max_visits: Option<u64>,
    #[builder(default)]
    pub visit_count: u64,
    #[builder(default)]
    pub last_visited: Option<Timestamp>,
}

impl UrlRecord {
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expire_at.is_some_and(|expire_at| now >= expire_at)
    }

    /// Whether the visit cap, if any, has been reached.
    pub fn visits_exhausted(&self) -> bool {
        self.max_visits
            .is_some_and(|max_visits| self.visit_count >= max_visits)
    }

    /// A record is live while it has neither expired nor used up its visits.
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        !self.is_expired_at(now) && !self.visits_exhausted()
    }
}

/// A read-only view of a record store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the record stored under `sequence`.
    /// Returns `None` if the sequence does not exist or has expired.
    async fn get(&self, sequence: &Sequence) -> Result<Option<UrlRecord>>;

    /// Checks whether a sequence is already taken.
    async fn exists(&self, sequence: &Sequence) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new record. Returns `Err(StorageError::Conflict)` if the
    /// sequence is already taken; the check and the insert are atomic.
    async fn insert(&self, sequence: &Sequence, record: UrlRecord) -> Result<()>;

    /// Deletes the record for a given sequence.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, sequence: &Sequence) -> Result<bool>;

    /// Counts one visit at `at`.
    ///
    /// Returns `false` without counting when the record is missing, expired,
    /// or already at its visit cap.
    async fn record_visit(&self, sequence: &Sequence, at: Timestamp) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn record() -> UrlRecord {
        UrlRecord::builder()
            .original_url("https://example.com")
            .fingerprint(Fingerprint::from(42))
            .build()
    }

    #[test]
    fn builder_defaults() {
        let record = record();
        assert!(!record.custom);
        assert_eq!(record.title, None);
        assert_eq!(record.expire_at, None);
        assert_eq!(record.max_visits, None);
        assert_eq!(record.visit_count, 0);
        assert!(record.is_live_at(Timestamp::now()));
    }

    #[test]
    fn expiry() {
        let now = Timestamp::now();
        let mut record = record();

        record.expire_at = Some(now - SignedDuration::from_secs(1));
        assert!(record.is_expired_at(now));
        assert!(!record.is_live_at(now));

        record.expire_at = Some(now + SignedDuration::from_hours(1));
        assert!(!record.is_expired_at(now));
        assert!(record.is_live_at(now));
    }

    #[test]
    fn visit_cap() {
        let mut record = record();
        record.max_visits = Some(2);
        record.visit_count = 1;
        assert!(!record.visits_exhausted());

        record.visit_count = 2;
        assert!(record.visits_exhausted());
        assert!(!record.is_live_at(Timestamp::now()));
    }

    #[test]
    fn serializes_fingerprint_as_string() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["fingerprint"], "42");
        assert_eq!(json["original_url"], "https://example.com");
    }
}
