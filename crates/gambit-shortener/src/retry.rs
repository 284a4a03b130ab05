use gambit_codec::MAX_SEQUENCE_LENGTH;
use jiff::Timestamp;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_LENGTH_STEP: usize = 1;

/// Collision handling for generated sequences.
///
/// When a generated sequence is taken, retry `n` (1-based) encodes the URL
/// salted with the current time and `n` at length `base + n * length_step`,
/// capped at [`MAX_SEQUENCE_LENGTH`]. After `max_attempts` failed retries the
/// shortener gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RetryPolicy {
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    #[builder(default = DEFAULT_LENGTH_STEP)]
    pub length_step: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// Sequence length used by retry `attempt`.
    pub fn length_for(&self, base_length: usize, attempt: u32) -> usize {
        let step = self.length_step.saturating_mul(attempt as usize);
        base_length.saturating_add(step).min(MAX_SEQUENCE_LENGTH)
    }

    /// The encoder input for retry `attempt`: the URL followed by the time
    /// in milliseconds since the Unix epoch and the attempt number.
    ///
    /// The attempt keeps capped-length retries within one millisecond apart.
    pub fn perturb(url: &str, at: Timestamp, attempt: u32) -> String {
        format!("{url}{}{attempt}", at.as_millisecond())
    }
}
