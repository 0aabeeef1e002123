// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Load / migrate / persist lifecycle for the counter collection.
//!
//! Loading never fails from the caller's point of view: unreadable or
//! malformed data is logged and the session starts with no counters.

use crate::counter::Counter;
use crate::record::{migrate_all, StoredCounter};
use crate::storage::{JsonStore, StorageAdapter, StorageError};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key under which the whole collection is stored.
pub const STORAGE_KEY: &str = "tallyCounters";

/// Read and migrate the stored collection, surfacing storage and format errors.
pub fn try_load_counters<S>(store: &JsonStore<S>) -> Result<Vec<Counter>, StorageError>
where
    S: StorageAdapter,
{
    let records: Option<Vec<StoredCounter>> = store.load(STORAGE_KEY)?;
    Ok(records.map(migrate_all).unwrap_or_default())
}

/// Read and migrate the stored collection; failures yield an empty collection.
pub fn load_counters<S>(store: &JsonStore<S>) -> Vec<Counter>
where
    S: StorageAdapter,
{
    match try_load_counters(store) {
        Ok(counters) => {
            debug!(count = counters.len(), "loaded counters");
            counters
        }
        Err(err) => {
            warn!(%err, "error loading counters; starting empty");
            Vec::new()
        }
    }
}

/// Load on the blocking pool so async callers are not stalled by the adapter.
pub async fn load_counters_async(adapter: Arc<dyn StorageAdapter>) -> Vec<Counter> {
    match tokio::task::spawn_blocking(move || load_counters(&JsonStore::new(adapter))).await {
        Ok(counters) => counters,
        Err(err) => {
            warn!(%err, "counter load task failed; starting empty");
            Vec::new()
        }
    }
}

/// Overwrite the stored collection with `counters`.
pub fn save_counters<S>(store: &JsonStore<S>, counters: &[Counter]) -> Result<(), StorageError>
where
    S: StorageAdapter,
{
    store.save(STORAGE_KEY, counters)
}
