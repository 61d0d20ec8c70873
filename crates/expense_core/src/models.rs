use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

pub type ParticipantId = i64;

/// Book/sheet pair addressing one expense ledger on whooweswho.net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub book: String,
    pub sheet: String,
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book={} sheet={}", self.book, self.sheet)
    }
}

/// One row of the `Row` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Decimal,
    #[serde(rename = "payor_id")]
    pub payer_id: ParticipantId,
    #[serde(rename = "split", default)]
    pub splits: Option<Vec<Split>>,
    #[serde(rename = "ctime")]
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Split {
    #[serde(rename = "id")]
    pub participant_id: ParticipantId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: Decimal,
}

/// The API sends `null` for blank fields; treat it like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ExpenseItem {
    /// Split value attributed to `id`, if any. When the API repeats an id the
    /// last entry wins.
    pub fn split_for(&self, id: ParticipantId) -> Option<Decimal> {
        self.splits
            .as_deref()?
            .iter()
            .rev()
            .find(|split| split.participant_id == id)
            .map(|split| split.value)
    }

    pub fn participant_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        std::iter::once(self.payer_id).chain(
            self.splits
                .iter()
                .flatten()
                .map(|split| split.participant_id),
        )
    }
}
