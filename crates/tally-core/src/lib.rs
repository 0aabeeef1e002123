// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core services for Tally Sheet (counters, tally marks, storage, persistence).
//! Keeps presentation adapters thin and framework-agnostic.

pub mod counter;
pub mod lifecycle;
pub mod marks;
pub mod palette;
pub mod persist;
pub mod prefs;
pub mod record;
pub mod storage;
pub mod store;

pub use counter::{CountField, Counter, CounterId};
pub use marks::{render_marks, Grouping, MarkGroup, TallyMarks};
pub use persist::{Immediate, NoPersist, PersistPort, WriteBehind};
pub use storage::{JsonStore, MemoryStorage, StorageAdapter, StorageError};
pub use store::CounterStore;
