use crate::error::{CodecError, Result};
use crate::vocabulary::Vocabulary;
use typed_builder::TypedBuilder;

pub const DEFAULT_SEQUENCE_LENGTH: usize = 5;
pub const MIN_SEQUENCE_LENGTH: usize = 3;
pub const MAX_SEQUENCE_LENGTH: usize = 8;
pub const DEFAULT_SEPARATOR: char = '.';

/// Configures a [`SequenceCodec`](crate::SequenceCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct CodecSettings {
    /// Number of moves in an encoded sequence, within
    /// `MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH`.
    #[builder(default = DEFAULT_SEQUENCE_LENGTH)]
    pub sequence_length: usize,
    /// Character placed between moves. Must not occur inside any move.
    #[builder(default = DEFAULT_SEPARATOR)]
    pub separator: char,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl CodecSettings {
    pub(crate) fn validate(&self, vocabulary: &Vocabulary) -> Result<()> {
        check_length(self.sequence_length)?;

        if vocabulary.collides_with(self.separator) {
            return Err(CodecError::InvalidSettings(format!(
                "separator '{}' occurs inside a chess move",
                self.separator
            )));
        }

        Ok(())
    }
}

pub(crate) fn check_length(length: usize) -> Result<()> {
    if !(MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH).contains(&length) {
        return Err(CodecError::InvalidLength {
            found: length,
            min: MIN_SEQUENCE_LENGTH,
            max: MAX_SEQUENCE_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = CodecSettings::default();
        assert_eq!(settings.sequence_length, 5);
        assert_eq!(settings.separator, '.');
        assert!(settings.validate(Vocabulary::canonical()).is_ok());
    }

    #[test]
    fn length_out_of_bounds() {
        let vocabulary = Vocabulary::canonical();
        for length in [0, 2, 9] {
            let settings = CodecSettings::builder().sequence_length(length).build();
            assert!(matches!(
                settings.validate(vocabulary),
                Err(CodecError::InvalidLength { found, .. }) if found == length
            ));
        }
    }

    #[test]
    fn separator_inside_a_move_is_rejected() {
        let settings = CodecSettings::builder().separator('+').build();
        assert!(matches!(
            settings.validate(Vocabulary::canonical()),
            Err(CodecError::InvalidSettings(_))
        ));
    }

    #[test]
    fn alternative_separator() {
        let settings = CodecSettings::builder().separator('_').build();
        assert!(settings.validate(Vocabulary::canonical()).is_ok());
    }
}
