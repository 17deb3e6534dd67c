//! Durable local preferences: last-used language and date.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use reflections_core::Language;

use crate::Selection;

/// What a preference store remembers between runs. Either field may be
/// missing or unreadable; the synchronizer falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSelection {
    pub language: Option<Language>,
    pub date: Option<NaiveDate>,
}

/// Durable store for the last-used selection.
///
/// `save` is fire-and-forget: a failed preference write must not break
/// navigation, so implementations log and move on.
pub trait PreferenceStore {
    fn load(&self) -> StoredSelection;
    fn save(&mut self, selection: &Selection);
}

/// JSON-file-backed preferences under the user config directory.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/daily-reflections/preferences.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daily-reflections")
            .join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FilePreferences {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> StoredSelection {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return StoredSelection::default();
        };
        match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring unreadable preferences");
                StoredSelection::default()
            }
        }
    }

    fn save(&mut self, selection: &Selection) {
        let stored = StoredSelection {
            language: Some(selection.language),
            date: Some(selection.date),
        };
        let result = self
            .path
            .parent()
            .map(std::fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| {
                let json = serde_json::to_string_pretty(&stored)?;
                std::fs::write(&self.path, json)
            });
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to save preferences");
        }
    }
}

/// In-memory store, for tests and for hosts that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    stored: StoredSelection,
}

impl MemoryPreferences {
    pub fn with(language: Option<Language>, date: Option<NaiveDate>) -> Self {
        Self {
            stored: StoredSelection { language, date },
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> StoredSelection {
        self.stored.clone()
    }

    fn save(&mut self, selection: &Selection) {
        self.stored = StoredSelection {
            language: Some(selection.language),
            date: Some(selection.date),
        };
    }
}
