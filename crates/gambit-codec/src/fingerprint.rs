use num_bigint::{BigUint, ParseBigIntError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::str::FromStr;

/// Number of leading digest bytes that make up a URL fingerprint.
const FINGERPRINT_BYTES: usize = 8;

/// A non-negative integer derived from a URL, or decoded from a sequence.
///
/// Backed by an arbitrary precision integer so that `B^L` sized values never
/// overflow during digit arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fingerprint(BigUint);

impl Fingerprint {
    /// Fingerprints an opaque input string.
    ///
    /// The first 8 bytes of its SHA-256 digest, read as a big-endian integer.
    pub fn of(input: &str) -> Self {
        let digest = Sha256::digest(input.as_bytes());
        Self(BigUint::from_bytes_be(&digest[..FINGERPRINT_BYTES]))
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for Fingerprint {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Fingerprint {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s).map(Self)
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Serialized as a decimal string: JSON numbers cannot carry values this wide.
impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
