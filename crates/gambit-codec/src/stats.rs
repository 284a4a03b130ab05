use crate::codec::SequenceCodec;
use crate::settings::{MAX_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH};
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Informational figures about the encoding space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecStats {
    /// Vocabulary size, the base of the encoding.
    pub move_set_size: usize,
    pub default_length: usize,
    /// `B^length` for every supported length.
    #[serde(serialize_with = "serialize_combinations")]
    pub combinations: BTreeMap<usize, BigUint>,
}

impl SequenceCodec {
    pub fn stats(&self) -> CodecStats {
        let combinations = (MIN_SEQUENCE_LENGTH..=MAX_SEQUENCE_LENGTH)
            .map(|length| (length, self.total_combinations(length)))
            .collect();

        CodecStats {
            move_set_size: self.vocabulary().base(),
            default_length: self.settings().sequence_length,
            combinations,
        }
    }
}

fn serialize_combinations<S>(
    combinations: &BTreeMap<usize, BigUint>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(
        combinations
            .iter()
            .map(|(length, total)| (format!("{length}_moves"), total.to_string())),
    )
}
