//! Persisted authentication session
//!
//! The session store is an explicit object injected into the client; the
//! persisted JSON is treated as an untrusted external format. A file that
//! fails to read, parse, or validate yields no session, never a panic.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use maqraa_api::dto::auth::{SessionUser, TokenPair};

use crate::error::{ClientError, Result};

/// An authenticated session: the user plus their token grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub tokens: TokenPair,
}

impl Session {
    /// Whether the access token has expired as of `now`.
    ///
    /// A session without an expiry never expires client-side; the backend
    /// still rejects a stale token with a 401.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.tokens.expires_at, Some(at) if at <= now)
    }

    /// Schema validation applied to loaded sessions.
    fn is_well_formed(&self) -> bool {
        self.user.id > 0 && !self.tokens.access_token.is_empty()
    }
}

/// Persistence for the authenticated session.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Load the persisted session, if a valid one exists.
    fn load(&self) -> Option<Session>;
    /// Persist a session.
    fn save(&self, session: &Session) -> Result<()>;
    /// Remove any persisted session.
    fn clear(&self) -> Result<()>;
}

/// Session store backed by a JSON file in the platform data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/maqraa/session.json`.
    ///
    /// # Errors
    /// Fails when the platform has no data directory.
    pub fn at_default_location() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| ClientError::Session("no platform data directory".to_string()))?;
        Ok(Self::new(dir.join("maqraa").join("session.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read session file");
                return None;
            }
        };

        let session: Session = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file is malformed, ignoring");
                return None;
            }
        };

        if !session.is_well_formed() {
            warn!(path = %self.path.display(), "session file failed validation, ignoring");
            return None;
        }

        Some(session)
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content).map_err(|e| ClientError::Session(e.to_string()))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }
}

/// In-memory session store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session() -> Session {
        Session {
            user: SessionUser {
                id: 3,
                full_name: Some("Umm Khalid".to_string()),
                ..SessionUser::default()
            },
            tokens: TokenPair {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                expires_at: None,
            },
        }
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert!(store.load().is_none());
        store.save(&sample_session()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.user.id, 3);
        assert_eq!(loaded.tokens.access_token, "access");

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn malformed_file_yields_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileSessionStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn wrong_shape_yields_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "user": "someone", "tokens": 5 }"#).unwrap();

        let store = FileSessionStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn empty_access_token_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut session = sample_session();
        session.tokens.access_token.clear();
        std::fs::write(&path, serde_json::to_string(&session).unwrap()).unwrap();

        let store = FileSessionStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn clearing_a_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));
        assert!(store.clear().is_ok());
    }

    #[test]
    fn expiry_check() {
        let mut session = sample_session();
        assert!(!session.is_expired(Utc::now()));

        session.tokens.expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(session.is_expired(Utc::now()));

        session.tokens.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::default();
        assert!(store.load().is_none());
        store.save(&sample_session()).unwrap();
        assert!(store.load().is_some());
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
