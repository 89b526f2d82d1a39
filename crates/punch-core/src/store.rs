//! Persisted client state.
//!
//! The backend owns every business entity; the only thing this client
//! persists is its own session (the credential pair, the cached user
//! summary, and two dashboard hints) plus the backend base URL.
//! Everything lives in one JSON file at `~/.punch/config.json`, the
//! terminal analogue of browser local storage. Session keys always
//! clear together; the base URL survives logout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::types::UserSummary;
use crate::error::{Error, Result};

/// Persistent client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Backend URL (e.g. "<https://attendance.example.com>").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Current session, present only while logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionState>,
}

/// Everything that belongs to one login and is wiped as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub access_token: String,
    pub refresh_token: String,
    /// Cached authenticated-user summary; advisory route gating only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    /// Pre-fetch guess at today's check-in state. The status endpoint
    /// is authoritative and overrides this on every dashboard load.
    #[serde(default)]
    pub checked_in: bool,
    /// Last check-in/out timestamp shown on the dashboard, also a hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_logged_time: Option<String>,
}

impl ClientConfig {
    /// Drop all session keys in one step. Calling this on an already
    /// logged-out config is a no-op, which keeps expiry handling
    /// idempotent.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    pub const fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }
}

/// File-backed store for [`ClientConfig`].
///
/// The path is injected so tests (and `PUNCH_CONFIG`) can point it
/// anywhere; production uses [`ConfigStore::default_path`].
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Config file location: `~/.punch/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|h| h.join(".punch").join("config.json"))
            .ok_or_else(|| Error::Config("cannot determine home directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load config from disk. A missing or unreadable file yields the
    /// default config rather than an error.
    pub fn load(&self) -> ClientConfig {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to disk, creating the parent directory if needed.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        (dir, store)
    }

    fn logged_in_config() -> ClientConfig {
        ClientConfig {
            base_url: Some("https://attendance.test".into()),
            session: Some(SessionState {
                access_token: "at".into(),
                refresh_token: "rt".into(),
                user: None,
                checked_in: true,
                last_logged_time: Some("09:15 AM".into()),
            }),
        }
    }

    #[test]
    fn missing_file_loads_default() {
        let (_dir, store) = temp_store();
        let cfg = store.load();
        assert!(cfg.base_url.is_none());
        assert!(!cfg.is_logged_in());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(!store.load().is_logged_in());
    }

    #[test]
    fn save_load_roundtrip() {
        let (_dir, store) = temp_store();
        store.save(&logged_in_config()).unwrap();

        let loaded = store.load();
        let session = loaded.session.unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token, "rt");
        assert!(session.checked_in);
        assert_eq!(session.last_logged_time.as_deref(), Some("09:15 AM"));
    }

    #[test]
    fn clear_session_keeps_base_url() {
        let (_dir, store) = temp_store();
        let mut cfg = logged_in_config();
        cfg.clear_session();
        store.save(&cfg).unwrap();

        let loaded = store.load();
        assert!(!loaded.is_logged_in());
        assert_eq!(loaded.base_url.as_deref(), Some("https://attendance.test"));
    }

    #[test]
    fn clearing_twice_is_a_noop() {
        let mut cfg = logged_in_config();
        cfg.clear_session();
        cfg.clear_session();
        assert!(cfg.session.is_none());
    }
}
