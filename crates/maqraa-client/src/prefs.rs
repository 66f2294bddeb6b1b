//! Locally persisted user preferences
//!
//! One JSON file per user (or `guest` before login), same tolerant load
//! policy as the session store: anything unreadable falls back to
//! defaults.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ClientError, Result};

/// Per-user display preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub lang: String,
    pub page_size: u64,
    pub screen_reader: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            lang: "ar".to_string(),
            page_size: 10,
            screen_reader: false,
        }
    }
}

/// Directory-backed preference storage.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    dir: PathBuf,
}

impl PreferencesStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under `<data dir>/maqraa/`.
    ///
    /// # Errors
    /// Fails when the platform has no data directory.
    pub fn at_default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ClientError::Session("no platform data directory".to_string()))?;
        Ok(Self::new(dir.join("maqraa")))
    }

    fn path_for(&self, user_id: Option<i64>) -> PathBuf {
        let key = match user_id {
            Some(id) => id.to_string(),
            None => "guest".to_string(),
        };
        self.dir.join(format!("preferences-{key}.json"))
    }

    /// Load preferences for a user, falling back to defaults.
    pub fn load(&self, user_id: Option<i64>) -> Preferences {
        let path = self.path_for(user_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Preferences::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read preferences");
                return Preferences::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "preferences file is malformed, using defaults");
                Preferences::default()
            }
        }
    }

    /// Persist preferences for a user.
    ///
    /// # Errors
    /// Fails when the directory cannot be created or the file written.
    pub fn save(&self, user_id: Option<i64>, prefs: &Preferences) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ClientError::Session(e.to_string()))?;
        let content = serde_json::to_string_pretty(prefs)?;
        fs::write(self.path_for(user_id), content).map_err(|e| ClientError::Session(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());
        assert_eq!(store.load(Some(5)), Preferences::default());
    }

    #[test]
    fn per_user_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());

        let prefs = Preferences {
            lang: "en".to_string(),
            page_size: 25,
            screen_reader: true,
        };
        store.save(Some(5), &prefs).unwrap();

        assert_eq!(store.load(Some(5)), prefs);
        // a different user still gets defaults
        assert_eq!(store.load(Some(6)), Preferences::default());
        // and so does the guest slot
        assert_eq!(store.load(None), Preferences::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());
        std::fs::write(dir.path().join("preferences-guest.json"), "[1, 2").unwrap();
        assert_eq!(store.load(None), Preferences::default());
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path());
        std::fs::write(dir.path().join("preferences-guest.json"), r#"{ "lang": "en" }"#).unwrap();

        let prefs = store.load(None);
        assert_eq!(prefs.lang, "en");
        assert_eq!(prefs.page_size, 10);
    }
}
