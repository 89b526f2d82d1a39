//! Session/token guard.
//!
//! Single owner of the persisted credential pair. Every authenticated
//! request goes through [`SessionGuard::access_token`], which returns
//! the stored access token while it is still live, performs exactly
//! one refresh exchange when it is not, and collapses every dead-end
//! into [`Error::SessionExpired`] with the session storage wiped.

use serde_json::json;
use tracing::{debug, warn};

use crate::api::types::{LoginResponse, RefreshResponse, UserSummary};
use crate::error::{Error, Result};
use crate::store::{ClientConfig, ConfigStore, SessionState};
use crate::token;

/// Injectable session service; shared by the API client and the CLI.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    store: ConfigStore,
    http: reqwest::Client,
    api_base: String,
}

impl SessionGuard {
    /// `api_base` is the versioned prefix, e.g.
    /// `https://attendance.example.com/api/v1`.
    pub fn new(store: ConfigStore, http: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            store,
            http,
            api_base: api_base.into(),
        }
    }

    /// Current persisted config.
    pub fn config(&self) -> ClientConfig {
        self.store.load()
    }

    /// A usable access token.
    ///
    /// Fast path: the stored token is present and unexpired, so it is
    /// returned without touching the network. Slow path: one refresh
    /// exchange against `POST /token/refresh`; the new access token
    /// is persisted before it is handed back. Anything else clears
    /// the session and fails with [`Error::SessionExpired`].
    pub async fn access_token(&self) -> Result<String> {
        let config = self.store.load();
        let Some(session) = config.session.clone() else {
            return Err(Error::SessionExpired);
        };

        if !session.access_token.is_empty() && !token::is_expired(&session.access_token) {
            return Ok(session.access_token);
        }

        if session.refresh_token.is_empty() {
            self.clear()?;
            return Err(Error::SessionExpired);
        }

        debug!("access token expired, refreshing");
        let resp = self
            .http
            .post(format!("{}/token/refresh", self.api_base))
            .json(&json!({ "refresh": session.refresh_token }))
            .send()
            .await?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "token refresh rejected");
            self.clear()?;
            return Err(Error::SessionExpired);
        }

        let refreshed: RefreshResponse = resp.json().await?;
        let mut config = self.store.load();
        if let Some(state) = config.session.as_mut() {
            state.access_token = refreshed.access.clone();
        }
        self.store.save(&config)?;

        Ok(refreshed.access)
    }

    /// Persist a fresh login: both tokens, the user summary, and
    /// reset dashboard hints.
    pub fn persist_login(&self, login: &LoginResponse) -> Result<()> {
        let mut config = self.store.load();
        config.session = Some(SessionState {
            access_token: login.access.clone(),
            refresh_token: login.refresh.clone(),
            user: login.user.clone(),
            checked_in: false,
            last_logged_time: None,
        });
        self.store.save(&config)
    }

    /// Wipe all session keys. Safe to call when already logged out.
    pub fn clear(&self) -> Result<()> {
        let mut config = self.store.load();
        config.clear_session();
        self.store.save(&config)
    }

    /// Mutate the live session in place (dashboard hints). No-op when
    /// logged out.
    pub fn update_session(&self, f: impl FnOnce(&mut SessionState)) -> Result<()> {
        let mut config = self.store.load();
        if let Some(state) = config.session.as_mut() {
            f(state);
            self.store.save(&config)?;
        }
        Ok(())
    }

    /// Role resolver: upper-cased roles decoded from the stored
    /// access token. Advisory navigation gating only: empty on any
    /// decode failure, never an error.
    pub fn roles(&self) -> Vec<String> {
        self.store
            .load()
            .session
            .map(|s| token::roles(&s.access_token))
            .unwrap_or_default()
    }

    /// Cached authenticated-user summary, if logged in.
    pub fn user(&self) -> Option<UserSummary> {
        self.store.load().session.and_then(|s| s.user)
    }
}
