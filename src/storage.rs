//! Persisted language selection.
//!
//! The browser kept this as a single local-storage entry; here it is one
//! small JSON file holding the selected code and when it was written. A
//! missing or unreadable file reads as "no selection" so a fresh or damaged
//! deployment still renders the canonical language.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The persisted record: which language was selected, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSelection {
    language: String,
    updated_at: DateTime<Utc>,
}

/// File-backed store for the user's language selection.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Create a store backed by the given file path. The file is not
    /// created until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted selection.
    ///
    /// Returns `None` when the file does not exist or does not parse; a
    /// corrupt record is treated the same as an absent one.
    pub fn selected_language(&self) -> Option<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Could not read {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<StoredSelection>(&raw) {
            Ok(stored) => Some(stored.language),
            Err(err) => {
                warn!("Discarding corrupt selection in {}: {err}", self.path.display());
                None
            }
        }
    }

    /// Persist a selection, replacing any previous record.
    pub fn set_selected_language(&self, code: &str) -> Result<()> {
        let stored = StoredSelection {
            language: code.to_string(),
            updated_at: Utc::now(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(&stored)
            .context("Failed to serialize language selection")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join("selected_language.json"))
    }

    // ==================== Read Tests ====================

    #[test]
    fn test_missing_file_reads_as_unset() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).selected_language(), None);
    }

    #[test]
    fn test_corrupt_file_reads_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ this is not json").unwrap();

        assert_eq!(store.selected_language(), None);
    }

    #[test]
    fn test_wrong_shape_reads_as_unset() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), r#"{"lang_code": "de"}"#).unwrap();

        assert_eq!(store.selected_language(), None);
    }

    // ==================== Write Tests ====================

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set_selected_language("de").unwrap();

        assert_eq!(store.selected_language(), Some("de".to_string()));
    }

    #[test]
    fn test_write_replaces_previous_selection() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set_selected_language("de").unwrap();
        store.set_selected_language("fr").unwrap();

        assert_eq!(store.selected_language(), Some("fr".to_string()));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("data").join("prefs").join("lang.json"));

        store.set_selected_language("de").unwrap();

        assert_eq!(store.selected_language(), Some("de".to_string()));
    }

    #[test]
    fn test_record_carries_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set_selected_language("de").unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["language"], "de");
        assert!(value["updated_at"].is_string());
    }
}
