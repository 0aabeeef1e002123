// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persist ports: where a [`CounterStore`](crate::store::CounterStore) sends
//! its snapshot after every applied mutation.
//!
//! Every snapshot is the full collection, so a newer snapshot always
//! supersedes an older one and writes never need merging.

use crate::counter::Counter;
use crate::lifecycle::save_counters;
use crate::storage::{JsonStore, StorageAdapter};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Snapshot sink for the counter collection.
pub trait PersistPort {
    /// Persist the full collection (best-effort; impl logs errors internally).
    fn persist(&self, counters: &[Counter]);
}

/// Discards snapshots; for purely in-memory stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersist;

impl PersistPort for NoPersist {
    fn persist(&self, _counters: &[Counter]) {}
}

/// Writes each snapshot synchronously on the caller's thread.
pub struct Immediate<S> {
    store: JsonStore<S>,
}

impl<S> Immediate<S> {
    /// Persist through `adapter`.
    pub fn new(adapter: S) -> Self {
        Self {
            store: JsonStore::new(adapter),
        }
    }

    /// Borrow the JSON service.
    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }
}

impl<S> PersistPort for Immediate<S>
where
    S: StorageAdapter,
{
    fn persist(&self, counters: &[Counter]) {
        if let Err(err) = save_counters(&self.store, counters) {
            warn!(%err, "error saving counters");
        }
    }
}

/// Asynchronous write-behind queue.
///
/// `persist` only enqueues; a single writer task drains the queue in order,
/// skips snapshots that already have a newer one queued, and writes on the
/// blocking pool.
pub struct WriteBehind {
    tx: UnboundedSender<Vec<Counter>>,
    writer: JoinHandle<()>,
}

impl WriteBehind {
    /// Start the writer task. Must be called from within a tokio runtime.
    pub fn spawn(adapter: Arc<dyn StorageAdapter>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(adapter, rx));
        Self { tx, writer }
    }

    /// Stop accepting snapshots and wait until queued ones are written.
    pub async fn close(self) {
        let Self { tx, writer } = self;
        drop(tx);
        if let Err(err) = writer.await {
            warn!(%err, "persist writer task failed");
        }
    }
}

impl PersistPort for WriteBehind {
    fn persist(&self, counters: &[Counter]) {
        if self.tx.send(counters.to_vec()).is_err() {
            warn!("persist writer stopped; snapshot dropped");
        }
    }
}

async fn run_writer(adapter: Arc<dyn StorageAdapter>, mut rx: UnboundedReceiver<Vec<Counter>>) {
    while let Some(mut snapshot) = rx.recv().await {
        let mut superseded = 0usize;
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
            superseded += 1;
        }
        if superseded > 0 {
            debug!(superseded, "skipping superseded snapshots");
        }

        let adapter = Arc::clone(&adapter);
        let count = snapshot.len();
        let written = tokio::task::spawn_blocking(move || {
            save_counters(&JsonStore::new(adapter), &snapshot)
        })
        .await;
        match written {
            Ok(Ok(())) => debug!(count, "persisted counters"),
            Ok(Err(err)) => warn!(%err, "error saving counters"),
            Err(err) => warn!(%err, "persist task failed"),
        }
    }
}
