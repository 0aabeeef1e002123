// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `StorageAdapter` for Tally Sheet (uses platform data dir).

use directories::ProjectDirs;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tally_core::storage::{StorageAdapter, StorageError};
use tracing::debug;

/// Store values as `<key>.json` files under a root directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    base: PathBuf,
}

impl FsStorage {
    /// Create a store rooted at the user data directory (e.g., `~/.local/share/tallysheet`).
    pub fn new() -> Result<Self, StorageError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "TallySheet")
            .ok_or_else(|| StorageError::Unavailable("could not resolve data dir".into()))?;
        Ok(Self::at(proj.data_dir()))
    }

    /// Create a store rooted at `base`. The directory is created on first write.
    pub fn at(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Root directory of this store.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl StorageAdapter for FsStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote storage file");
        Ok(())
    }
}
