// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User preferences stored next to the counters.

use crate::palette::{self, PaletteColor};
use crate::storage::{JsonStore, StorageAdapter, StorageError};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Key under which preferences are stored.
pub const PREFS_KEY: &str = "prefs";

/// Saved preferences for a presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyPrefs {
    /// Color preselected when creating a counter.
    #[serde(default = "default_color_value")]
    pub default_color: String,
}

fn default_color_value() -> String {
    palette::default_color().value.to_owned()
}

impl Default for TallyPrefs {
    fn default() -> Self {
        Self {
            default_color: default_color_value(),
        }
    }
}

impl TallyPrefs {
    /// Palette entry for the preselected color (falls back to the first entry).
    pub fn default_palette_color(&self) -> PaletteColor {
        palette::describe(&self.default_color)
    }
}

/// Load preferences (defaults if missing or unreadable).
pub fn load_prefs<S>(store: &JsonStore<S>) -> TallyPrefs
where
    S: StorageAdapter,
{
    match store.load::<TallyPrefs>(PREFS_KEY) {
        Ok(prefs) => prefs.unwrap_or_default(),
        Err(err) => {
            warn!(%err, "error loading preferences; using defaults");
            TallyPrefs::default()
        }
    }
}

/// Persist preferences.
pub fn save_prefs<S>(store: &JsonStore<S>, prefs: &TallyPrefs) -> Result<(), StorageError>
where
    S: StorageAdapter,
{
    store.save(PREFS_KEY, prefs)
}
