// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted counter records and the legacy-shape upgrade.
//!
//! Early builds stored a single scalar `count` per counter. Such records are
//! decoded into [`StoredCounter::Legacy`] and converted on load; the current
//! shape is written back on the next persist.

use crate::counter::{Counter, CounterId};
use serde::{Deserialize, Serialize};

/// Record written before the second tally existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCounter {
    /// Stable identifier.
    pub id: CounterId,
    /// Display name.
    pub name: String,
    /// The single tally, becomes `count1`.
    pub count: u64,
    /// Color token.
    pub color: String,
}

/// Any record shape accepted on read.
///
/// The legacy variant is tried first: a record carrying `count` is upgraded
/// even if it also has `count1`/`count2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredCounter {
    /// `{ id, name, count, color }`
    Legacy(LegacyCounter),
    /// `{ id, name, count1, count2, color }`
    Current(Counter),
}

impl From<LegacyCounter> for Counter {
    fn from(legacy: LegacyCounter) -> Self {
        Self {
            id: legacy.id,
            name: legacy.name,
            count1: legacy.count,
            count2: 0,
            color: legacy.color,
        }
    }
}

impl From<Counter> for StoredCounter {
    fn from(counter: Counter) -> Self {
        Self::Current(counter)
    }
}

/// Convert a stored record into the current shape. Current records pass through.
pub fn migrate(record: StoredCounter) -> Counter {
    match record {
        StoredCounter::Legacy(legacy) => legacy.into(),
        StoredCounter::Current(counter) => counter,
    }
}

/// Migrate every record, keeping sequence order.
pub fn migrate_all(records: Vec<StoredCounter>) -> Vec<Counter> {
    records.into_iter().map(migrate).collect()
}
