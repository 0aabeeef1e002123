// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage port for raw string values and a JSON service layered on top.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Storage port for raw string values keyed by logical name.
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`. Returns `Ok(None)` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Overwrite the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Backend cannot serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Thin service that serializes values as JSON and delegates storage to an adapter.
pub struct JsonStore<S> {
    adapter: S,
}

impl<S> JsonStore<S> {
    /// Create a new service using the given adapter.
    pub fn new(adapter: S) -> Self {
        Self { adapter }
    }

    /// Borrow the underlying adapter.
    pub fn adapter(&self) -> &S {
        &self.adapter
    }

    /// Consume the service and return the inner adapter.
    pub fn into_inner(self) -> S {
        self.adapter
    }
}

impl<S> JsonStore<S>
where
    S: StorageAdapter,
{
    /// Load and deserialize the value for `key`. Returns `Ok(None)` if missing or blank.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned,
    {
        match self.adapter.read(key)? {
            Some(text) if !text.trim().is_empty() => Ok(Some(serde_json::from_str(&text)?)),
            _ => Ok(None),
        }
    }

    /// Serialize and persist the value for `key`, replacing any previous value.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string_pretty(value)?;
        self.adapter.write(key, &text)
    }
}

/// In-memory adapter. Clones share the same backing map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one raw value.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.insert_raw(key, value);
        storage
    }

    /// Put a raw value without counting it as a write.
    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.inner.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    /// Raw value currently stored under `key`.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.inner
            .entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// When set, every read and write fails with [`StorageError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory storage set to fail".into()));
        }
        Ok(())
    }
}

impl StorageAdapter for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.get_raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        let mut entries = self
            .inner
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".into()))?;
        entries.insert(key.to_owned(), value.to_owned());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
