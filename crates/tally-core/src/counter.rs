// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Counter entity: a named, colored pair of independent non-negative tallies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(String);

impl CounterId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CounterId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CounterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Selects one of the two tallies carried by a [`Counter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountField {
    /// First tally, shown as "Getrunken".
    Count1,
    /// Second tally, shown as "Bezahlt".
    Count2,
}

impl CountField {
    /// Both fields in display order.
    pub const ALL: [CountField; 2] = [CountField::Count1, CountField::Count2];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Count1 => "Getrunken",
            Self::Count2 => "Bezahlt",
        }
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A counter record in the current persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Stable identifier, unique within a store.
    pub id: CounterId,
    /// Display name (trimmed, non-empty).
    pub name: String,
    /// "Getrunken" tally.
    pub count1: u64,
    /// "Bezahlt" tally.
    pub count2: u64,
    /// Opaque color token, normally a palette value.
    pub color: String,
}

impl Counter {
    /// Fresh counter with both tallies at zero.
    pub fn new(id: CounterId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            count1: 0,
            count2: 0,
            color: color.into(),
        }
    }

    /// Current value of one tally.
    pub fn count(&self, which: CountField) -> u64 {
        match which {
            CountField::Count1 => self.count1,
            CountField::Count2 => self.count2,
        }
    }

    /// Mutable access to one tally.
    pub fn count_mut(&mut self, which: CountField) -> &mut u64 {
        match which {
            CountField::Count1 => &mut self.count1,
            CountField::Count2 => &mut self.count2,
        }
    }

    /// Add `delta` to one tally, clamping at zero.
    pub fn apply_delta(&mut self, which: CountField, delta: i64) {
        let slot = self.count_mut(which);
        *slot = slot.saturating_add_signed(delta);
    }

    /// Sum of both tallies.
    pub fn sum(&self) -> u64 {
        self.count1.saturating_add(self.count2)
    }
}
