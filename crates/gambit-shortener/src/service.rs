use crate::clock::{Clock, SystemClock};
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use gambit_codec::{CodecStats, Fingerprint, Sequence, SequenceCodec};
use gambit_core::{
    Availability, ExpirationPolicy, Repository, ShortenParams, Shortened, Shortener,
    ShortenerError, StorageError, UrlRecord,
};
use jiff::{SignedDuration, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of alternatives offered when a custom sequence is taken.
pub const SUGGESTION_COUNT: usize = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `SequenceCodec` to handle:
/// - Sequence generation, with bounded collision retries
/// - Custom sequences, with suggestions when taken
/// - Expiration policy conversion and visit caps
/// - URL validation
///
/// Availability is decided by the repository's atomic insert: a duplicate
/// key on insert is handled exactly like a sequence reported as taken.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, C = SystemClock> {
    repository: Arc<R>,
    codec: Arc<SequenceCodec>,
    policy: RetryPolicy,
    clock: C,
}

impl<R: Repository> ShortenerService<R> {
    /// Creates a new `ShortenerService` on the system clock.
    pub fn new(repository: R, codec: SequenceCodec) -> Self {
        Self::with_clock(repository, codec, SystemClock)
    }
}

impl<R: Repository, C: Clock> ShortenerService<R, C> {
    pub fn with_clock(repository: R, codec: SequenceCodec, clock: C) -> Self {
        Self {
            repository: Arc::new(repository),
            codec: Arc::new(codec),
            policy: RetryPolicy::default(),
            clock,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn codec(&self) -> &SequenceCodec {
        &self.codec
    }

    /// Validates that the URL has a valid format (has a scheme and host).
    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        };

        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if scheme.is_empty() || host.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a valid scheme and host: {}",
                url
            )));
        }

        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                scheme
            )));
        }

        Ok(())
    }

    fn expire_at(
        expiration: ExpirationPolicy,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, ShortenerError> {
        match expiration {
            ExpirationPolicy::Never => Ok(None),
            ExpirationPolicy::AfterDuration(duration) => {
                let duration = SignedDuration::try_from(duration)
                    .map_err(|e| ShortenerError::InvalidExpiration(e.to_string()))?;
                now.checked_add(duration)
                    .map(Some)
                    .map_err(|e| ShortenerError::InvalidExpiration(e.to_string()))
            }
            ExpirationPolicy::AtTimestamp(timestamp) => {
                if timestamp <= now {
                    return Err(ShortenerError::InvalidExpiration(format!(
                        "expiration {timestamp} is in the past"
                    )));
                }
                Ok(Some(timestamp))
            }
        }
    }

    /// Tries to store `template` under `sequence`.
    ///
    /// Returns `None` when the sequence is taken, whether the lookup says so
    /// or the insert loses a race on the unique key.
    async fn try_claim(
        &self,
        sequence: &Sequence,
        template: &UrlRecord,
    ) -> Result<Option<UrlRecord>, ShortenerError> {
        if self.repository.exists(sequence).await? {
            return Ok(None);
        }

        let mut record = template.clone();
        record.fingerprint = self.codec.decode(sequence.as_str())?;

        match self.repository.insert(sequence, record.clone()).await {
            Ok(()) => Ok(Some(record)),
            Err(StorageError::Conflict(_)) => {
                debug!(sequence = %sequence, "sequence claimed concurrently");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn claim_custom(
        &self,
        raw: &str,
        template: UrlRecord,
    ) -> Result<Shortened, ShortenerError> {
        let sequence = self.codec.parse(raw)?;

        match self.try_claim(&sequence, &template).await? {
            Some(record) => Ok(Shortened { sequence, record }),
            None => {
                let suggestions = self.codec.suggest_alternatives(&sequence, SUGGESTION_COUNT);
                Err(ShortenerError::SequenceTaken {
                    sequence,
                    suggestions,
                })
            }
        }
    }

    async fn claim_generated(&self, template: UrlRecord) -> Result<Shortened, ShortenerError> {
        let url = template.original_url.as_str();
        let base_length = self.codec.settings().sequence_length;
        let mut sequence = self.codec.encode(url);
        let mut attempt = 0;

        loop {
            if let Some(record) = self.try_claim(&sequence, &template).await? {
                return Ok(Shortened { sequence, record });
            }

            attempt += 1;
            if attempt > self.policy.max_attempts {
                warn!(url, attempts = self.policy.max_attempts, "exhausted sequence retries");
                return Err(ShortenerError::ExhaustedRetries {
                    attempts: self.policy.max_attempts,
                });
            }

            let length = self.policy.length_for(base_length, attempt);
            debug!(sequence = %sequence, attempt, length, "sequence taken, retrying");

            let salted = RetryPolicy::perturb(url, self.clock.now(), attempt);
            sequence = self.codec.encode_with_length(&salted, length)?;
        }
    }
}

#[async_trait]
impl<R: Repository, C: Clock> Shortener for ShortenerService<R, C> {
    async fn shorten(&self, params: ShortenParams) -> Result<Shortened, ShortenerError> {
        Self::validate_url(&params.original_url)?;

        let now = self.clock.now();
        let expire_at = Self::expire_at(params.expiration, now)?;

        // The fingerprint is filled in once a sequence is chosen.
        let template = UrlRecord {
            original_url: params.original_url,
            fingerprint: Fingerprint::default(),
            custom: params.custom_sequence.is_some(),
            title: params.title,
            description: params.description,
            created_at: now,
            expire_at,
            max_visits: params.max_visits,
            visit_count: 0,
            last_visited: None,
        };

        let shortened = match params.custom_sequence {
            Some(raw) => self.claim_custom(&raw, template).await?,
            None => self.claim_generated(template).await?,
        };

        info!(
            sequence = %shortened.sequence,
            custom = shortened.record.custom,
            "created short url"
        );
        Ok(shortened)
    }

    async fn resolve(&self, sequence: &Sequence) -> Result<Option<UrlRecord>, ShortenerError> {
        let now = self.clock.now();
        let record = self.repository.get(sequence).await?;
        Ok(record.filter(|record| record.is_live_at(now)))
    }

    async fn visit(&self, sequence: &Sequence) -> Result<Option<UrlRecord>, ShortenerError> {
        if !self
            .repository
            .record_visit(sequence, self.clock.now())
            .await?
        {
            debug!(sequence = %sequence, "sequence missing, expired or out of visits");
            return Ok(None);
        }

        Ok(self.repository.get(sequence).await?)
    }

    async fn delete(&self, sequence: &Sequence) -> Result<bool, ShortenerError> {
        Ok(self.repository.delete(sequence).await?)
    }

    async fn check_availability(&self, raw: &str) -> Result<Availability, ShortenerError> {
        if !self.codec.validate(raw) {
            return Ok(Availability {
                sequence: raw.to_string(),
                valid: false,
                available: None,
                reason: self.codec.parse(raw).err().map(|e| e.to_string()),
            });
        }

        let taken = self
            .repository
            .exists(&Sequence::new_unchecked(raw))
            .await?;

        Ok(Availability {
            sequence: raw.to_string(),
            valid: true,
            available: Some(!taken),
            reason: taken.then(|| "chess sequence already taken".to_string()),
        })
    }

    fn stats(&self) -> CodecStats {
        self.codec.stats()
    }

    fn parse_sequence(&self, raw: &str) -> Result<Sequence, ShortenerError> {
        Ok(self.codec.parse(raw)?)
    }
}
