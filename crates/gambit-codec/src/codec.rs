use crate::error::{CodecError, Result};
use crate::fingerprint::Fingerprint;
use crate::sequence::Sequence;
use crate::settings::{check_length, CodecSettings, MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH};
use crate::vocabulary::Vocabulary;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;

/// Converts URLs into chess move sequences and sequences back into integers.
///
/// A sequence is the base-`B` representation of a fingerprint, least
/// significant digit first, where `B` is the vocabulary size and each digit
/// is written as the move at that vocabulary index.
///
/// The codec is immutable after construction and performs no I/O, so a single
/// instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct SequenceCodec {
    settings: CodecSettings,
    vocabulary: &'static Vocabulary,
}

impl SequenceCodec {
    /// Creates a codec over the canonical chess vocabulary.
    pub fn new(settings: CodecSettings) -> Result<Self> {
        let vocabulary = Vocabulary::canonical();
        settings.validate(vocabulary)?;
        Ok(Self {
            settings,
            vocabulary,
        })
    }

    pub fn settings(&self) -> &CodecSettings {
        &self.settings
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        self.vocabulary
    }

    pub fn separator(&self) -> char {
        self.settings.separator
    }

    /// Encodes `url` using the configured sequence length.
    ///
    /// Pure: the same URL always yields the same sequence.
    pub fn encode(&self, url: &str) -> Sequence {
        self.sequence_for(&Fingerprint::of(url), self.settings.sequence_length)
    }

    /// Encodes `url` into a sequence of exactly `length` moves.
    pub fn encode_with_length(&self, url: &str, length: usize) -> Result<Sequence> {
        check_length(length)?;
        Ok(self.sequence_for(&Fingerprint::of(url), length))
    }

    /// Writes `fingerprint` as `length` base-`B` digits, least significant first.
    ///
    /// Digits beyond `length` are dropped, so fingerprints `>= B^length`
    /// share a sequence with their remainder modulo `B^length`.
    pub fn sequence_for(&self, fingerprint: &Fingerprint, length: usize) -> Sequence {
        let tokens = self.vocabulary.tokens();
        let base = BigUint::from(self.vocabulary.base());
        let mut remaining = fingerprint.as_biguint().clone();
        let mut moves = Vec::with_capacity(length);

        for _ in 0..length {
            // always below `base`
            let digit = (&remaining % &base).to_usize().unwrap_or_default();
            moves.push(tokens[digit]);
            remaining /= &base;
        }

        Sequence::from_moves(moves, self.settings.separator)
    }

    /// Decodes a sequence back into its fingerprint.
    ///
    /// Fails with [`CodecError::InvalidLength`] when the move count is outside
    /// `MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH`, and with
    /// [`CodecError::UnknownToken`] for the first move not in the vocabulary.
    pub fn decode(&self, raw: &str) -> Result<Fingerprint> {
        let digits = self.digits(raw)?;
        let base = BigUint::from(self.vocabulary.base());

        let mut fingerprint = BigUint::zero();
        let mut place = BigUint::one();
        for digit in digits {
            fingerprint += &place * BigUint::from(digit);
            place *= &base;
        }

        Ok(Fingerprint::from(fingerprint))
    }

    /// Structural check with the same rules as [`decode`](Self::decode).
    pub fn validate(&self, raw: &str) -> bool {
        let count = raw.split(self.settings.separator).count();
        if !(MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&count) {
            return false;
        }

        raw.split(self.settings.separator)
            .all(|mv| self.vocabulary.contains(mv))
    }

    /// Parses user input, such as a custom sequence, into a [`Sequence`].
    pub fn parse(&self, raw: &str) -> Result<Sequence> {
        self.digits(raw)?;
        Ok(Sequence::new_unchecked(raw))
    }

    /// Suggests `count` variants of `sequence` with a random final move.
    ///
    /// Suggestions are not checked for availability, and may repeat.
    pub fn suggest_alternatives(&self, sequence: &Sequence, count: usize) -> Vec<Sequence> {
        self.suggest_alternatives_with(sequence, count, &mut rand::thread_rng())
    }

    /// Same as [`suggest_alternatives`](Self::suggest_alternatives) with a
    /// caller-provided random number generator.
    pub fn suggest_alternatives_with<R: Rng + ?Sized>(
        &self,
        sequence: &Sequence,
        count: usize,
        rng: &mut R,
    ) -> Vec<Sequence> {
        let separator = self.settings.separator;
        let moves: Vec<&str> = sequence.moves(separator).collect();
        let Some((_, prefix)) = moves.split_last() else {
            return Vec::new();
        };
        let tokens = self.vocabulary.tokens();

        (0..count)
            .map(|_| {
                let last = tokens[rng.gen_range(0..tokens.len())];
                Sequence::from_moves(prefix.iter().copied().chain([last]), separator)
            })
            .collect()
    }

    /// Number of distinct sequences of `length` moves, `B^length`.
    pub fn total_combinations(&self, length: usize) -> BigUint {
        num_traits::pow(BigUint::from(self.vocabulary.base()), length)
    }

    fn digits(&self, raw: &str) -> Result<Vec<usize>> {
        let moves: Vec<&str> = raw.split(self.settings.separator).collect();
        check_length(moves.len())?;

        moves
            .into_iter()
            .map(|mv| {
                self.vocabulary
                    .index_of(mv)
                    .ok_or_else(|| CodecError::UnknownToken(mv.to_string()))
            })
            .collect()
    }
}

impl Default for SequenceCodec {
    fn default() -> Self {
        Self {
            settings: CodecSettings::default(),
            vocabulary: Vocabulary::canonical(),
        }
    }
}
