// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Counter store: the single owner of the ordered counter collection.
//!
//! Operations on unknown ids and creation with a blank name are silent
//! no-ops. Mutating methods return whether a counter matched so callers may
//! report it, but the store itself never treats it as an error.

use crate::counter::{CountField, Counter, CounterId};
use crate::persist::{NoPersist, PersistPort};
use std::time::{SystemTime, UNIX_EPOCH};

/// Ordered counters plus the port every applied mutation is persisted through.
#[derive(Debug)]
pub struct CounterStore<P = NoPersist> {
    counters: Vec<Counter>,
    port: P,
}

impl CounterStore<NoPersist> {
    /// Empty store that persists nothing.
    pub fn in_memory() -> Self {
        Self::new(NoPersist)
    }
}

impl Default for CounterStore<NoPersist> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<P> CounterStore<P>
where
    P: PersistPort,
{
    /// Empty store.
    pub fn new(port: P) -> Self {
        Self::with_counters(Vec::new(), port)
    }

    /// Store seeded with a loaded collection. Nothing is persisted until the first mutation.
    pub fn with_counters(counters: Vec<Counter>, port: P) -> Self {
        Self { counters, port }
    }

    /// Counters in creation order.
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Counter with the given id.
    pub fn get(&self, id: &CounterId) -> Option<&Counter> {
        self.counters.iter().find(|c| &c.id == id)
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// True when there are no counters.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Borrow the persist port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Consume the store, returning the counters and the persist port.
    pub fn into_parts(self) -> (Vec<Counter>, P) {
        (self.counters, self.port)
    }

    /// Append a new counter with both tallies at zero.
    ///
    /// The name is trimmed; a blank name is ignored and yields `None`.
    pub fn add(&mut self, name: &str, color: impl Into<String>) -> Option<CounterId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.next_id();
        self.counters.push(Counter::new(id.clone(), name, color));
        self.persist();
        Some(id)
    }

    /// Add `delta` to one tally, clamping at zero.
    pub fn update_count(&mut self, id: &CounterId, which: CountField, delta: i64) -> bool {
        self.modify(id, |c| c.apply_delta(which, delta))
    }

    /// Add one to a tally.
    pub fn increment(&mut self, id: &CounterId, which: CountField) -> bool {
        self.update_count(id, which, 1)
    }

    /// Subtract one from a tally, never going below zero.
    pub fn decrement(&mut self, id: &CounterId, which: CountField) -> bool {
        self.update_count(id, which, -1)
    }

    /// Zero one tally, or both when `which` is `None`.
    pub fn reset(&mut self, id: &CounterId, which: Option<CountField>) -> bool {
        self.modify(id, |c| match which {
            Some(field) => *c.count_mut(field) = 0,
            None => {
                c.count1 = 0;
                c.count2 = 0;
            }
        })
    }

    /// Delete a counter.
    pub fn remove(&mut self, id: &CounterId) -> bool {
        let before = self.counters.len();
        self.counters.retain(|c| &c.id != id);
        let removed = self.counters.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Change a counter's color token.
    pub fn recolor(&mut self, id: &CounterId, color: impl Into<String>) -> bool {
        let color = color.into();
        self.modify(id, |c| c.color = color)
    }

    /// Sum of both tallies over all counters.
    pub fn total(&self) -> u64 {
        self.counters
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.sum()))
    }

    fn modify(&mut self, id: &CounterId, f: impl FnOnce(&mut Counter)) -> bool {
        let Some(counter) = self.counters.iter_mut().find(|c| &c.id == id) else {
            return false;
        };
        f(counter);
        self.persist();
        true
    }

    fn persist(&self) {
        self.port.persist(&self.counters);
    }

    /// Creation time in milliseconds, bumped past any id already in use.
    fn next_id(&self) -> CounterId {
        let mut candidate = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        loop {
            let id = candidate.to_string();
            if !self.counters.iter().any(|c| c.id.as_str() == id) {
                return CounterId::new(id);
            }
            candidate += 1;
        }
    }
}
