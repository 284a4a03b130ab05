use serde::Serialize;
use std::fmt::Display;

/// A separator-joined list of chess moves identifying a short link.
///
/// Values are produced by [`SequenceCodec`](crate::SequenceCodec), either by
/// encoding a URL or by parsing user input, so they always hold known moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    pub(crate) fn from_moves<'a>(
        moves: impl IntoIterator<Item = &'a str>,
        separator: char,
    ) -> Self {
        let mut raw = String::new();
        for (position, mv) in moves.into_iter().enumerate() {
            if position > 0 {
                raw.push(separator);
            }
            raw.push_str(mv);
        }
        Self(raw)
    }

    /// Creates a `Sequence` without validation.
    ///
    /// Use this only for values read back from trusted storage.
    pub fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the sequence into its moves, in digit order.
    pub fn moves(&self, separator: char) -> impl Iterator<Item = &str> {
        self.0.split(separator)
    }

    /// Generates the full short URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
