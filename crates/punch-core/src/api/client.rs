//! Authenticated API client for the attendance backend.
//!
//! Wraps every call in the same contract: obtain a bearer token from
//! the session guard, issue the request, and normalize failures into
//! the [`Error`] taxonomy. A 401/403 on an authenticated call wipes
//! the stored session and surfaces [`Error::SessionExpired`] so the
//! front end can send the user back to login.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::api::query::LogFilter;
use crate::api::types::{
    AdminLogResults, ApiMessage, AttendanceSession, AttendanceStatus, CheckResponse,
    LoginResponse, Paginated, Profile, UpdateUserResponse, UserRecord,
};
use crate::admin::NewUser;
use crate::error::{Error, Result};
use crate::session::SessionGuard;
use crate::store::ConfigStore;

/// REST client, one per CLI invocation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    session: SessionGuard,
}

impl ApiClient {
    /// Build a client against `base_url` with session state in
    /// `store`.
    pub fn new(base_url: &str, store: ConfigStore) -> Result<Self> {
        if base_url.is_empty() {
            return Err(Error::Config("base URL is empty".into()));
        }
        let http = reqwest::Client::builder().build()?;
        let api_base = format!("{}/api/v1", base_url.trim_end_matches('/'));
        let session = SessionGuard::new(store, http.clone(), api_base.clone());
        Ok(Self {
            http,
            api_base,
            session,
        })
    }

    /// The session guard backing this client.
    pub const fn session(&self) -> &SessionGuard {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Guard-checked request with bearer auth.
    async fn authed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let access = self.session.access_token().await?;
        let mut req = self
            .http
            .request(method.clone(), self.url(path))
            .bearer_auth(access);
        if let Some(body) = body {
            req = req.json(&body);
        }
        debug!(%method, path, "authenticated request");
        let resp = req.send().await?;
        self.handle(resp, true).await
    }

    /// Unauthenticated request (login, refresh happens in the guard,
    /// health probe). A 401 here is an ordinary API failure, not a
    /// session expiry.
    async fn open<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        self.handle(resp, false).await
    }

    async fn handle<T: DeserializeOwned>(&self, resp: reqwest::Response, authed: bool) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let message = error_message(resp).await;
        if authed && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
            // Already-empty storage makes this a no-op on repeat.
            self.session.clear()?;
            return Err(Error::SessionExpired);
        }
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// `POST /login`. Persists the credential pair and user summary
    /// on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let resp: LoginResponse = self
            .open(
                Method::POST,
                "/login",
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        self.session.persist_login(&resp)?;
        Ok(resp)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// `GET /profile`.
    pub async fn profile(&self) -> Result<Profile> {
        self.authed(Method::GET, "/profile", None).await
    }

    /// `POST /profile/change-password`.
    pub async fn change_password(&self, current: &str, new: &str) -> Result<ApiMessage> {
        self.authed(
            Method::POST,
            "/profile/change-password",
            Some(json!({ "current_password": current, "new_password": new })),
        )
        .await
    }

    // =========================================================================
    // Attendance
    // =========================================================================

    /// `POST /attendance/checkin`. On success the persisted hints
    /// flip to checked-in with the backend's check-in timestamp.
    pub async fn check_in(&self) -> Result<CheckResponse> {
        let resp: CheckResponse = self
            .authed(Method::POST, "/attendance/checkin", Some(json!({})))
            .await?;
        let logged = resp.session.as_ref().map(|s| s.check_in.clone());
        self.session.update_session(|state| {
            state.checked_in = true;
            if logged.is_some() {
                state.last_logged_time = logged;
            }
        })?;
        Ok(resp)
    }

    /// `POST /attendance/checkout`. Mirror of [`Self::check_in`].
    pub async fn check_out(&self) -> Result<CheckResponse> {
        let resp: CheckResponse = self
            .authed(Method::POST, "/attendance/checkout", Some(json!({})))
            .await?;
        let logged = resp.session.as_ref().and_then(|s| s.check_out.clone());
        self.session.update_session(|state| {
            state.checked_in = false;
            if logged.is_some() {
                state.last_logged_time = logged;
            }
        })?;
        Ok(resp)
    }

    /// `GET /attendance/status`. Authoritative; the persisted
    /// checked-in hint is overwritten with whatever comes back.
    pub async fn attendance_status(&self) -> Result<AttendanceStatus> {
        let status: AttendanceStatus = self.authed(Method::GET, "/attendance/status", None).await?;
        self.session.update_session(|state| {
            state.checked_in = status.checked_in;
        })?;
        Ok(status)
    }

    /// `GET /attendance/history`, paginated. Page 1 is implicit.
    pub async fn attendance_history(&self, page: u32) -> Result<Paginated<Vec<AttendanceSession>>> {
        let path = if page > 1 {
            format!("/attendance/history?page={page}")
        } else {
            "/attendance/history".to_string()
        };
        self.authed(Method::GET, &path, None).await
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// `GET /users`.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        self.authed(Method::GET, "/users", None).await
    }

    /// `GET /admin/user/{id}`.
    pub async fn user_detail(&self, id: u64) -> Result<UserRecord> {
        self.authed(Method::GET, &format!("/admin/user/{id}"), None)
            .await
    }

    /// `PATCH /admin/user/{id}` with a sparse patch built by
    /// [`crate::admin::build_user_patch`].
    pub async fn update_user(&self, id: u64, patch: Value) -> Result<UpdateUserResponse> {
        self.authed(Method::PATCH, &format!("/admin/user/{id}"), Some(patch))
            .await
    }

    /// `DELETE /admin/user/{id}`.
    pub async fn delete_user(&self, id: u64, admin_password: &str) -> Result<ApiMessage> {
        self.authed(
            Method::DELETE,
            &format!("/admin/user/{id}"),
            Some(json!({ "admin_password": admin_password })),
        )
        .await
    }

    /// `GET /admin/attendance-logs` with the filter's query string.
    pub async fn attendance_logs(&self, filter: &LogFilter) -> Result<Paginated<AdminLogResults>> {
        let path = format!("/admin/attendance-logs{}", filter.to_query_string());
        self.authed(Method::GET, &path, None).await
    }

    /// `PATCH /admin/attendance/correction/{session_id}` with a
    /// payload from [`crate::admin::correction_payload`].
    pub async fn correct_attendance(&self, session_id: u64, payload: Value) -> Result<ApiMessage> {
        self.authed(
            Method::PATCH,
            &format!("/admin/attendance/correction/{session_id}"),
            Some(payload),
        )
        .await
    }

    /// `DELETE /admin/attendance/correction/{session_id}`.
    pub async fn delete_attendance(
        &self,
        session_id: u64,
        admin_password: &str,
    ) -> Result<ApiMessage> {
        self.authed(
            Method::DELETE,
            &format!("/admin/attendance/correction/{session_id}"),
            Some(json!({ "admin_password": admin_password })),
        )
        .await
    }

    /// `GET /admin/system-stats`. The body may nest the stats under a
    /// `data` key; unwrap it when present.
    pub async fn system_stats(&self) -> Result<Value> {
        let raw: Value = self.authed(Method::GET, "/admin/system-stats", None).await?;
        Ok(match raw {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        })
    }

    /// `POST /register` (admin-protected).
    pub async fn register_user(&self, new_user: &NewUser) -> Result<ApiMessage> {
        self.authed(Method::POST, "/register", Some(serde_json::to_value(new_user)?))
            .await
    }

    /// `POST /test`, unauthenticated health probe.
    pub async fn ping(&self) -> Result<Value> {
        self.open(Method::POST, "/test", Some(json!({}))).await
    }
}

/// Best-effort human-readable message from an error body: `message`,
/// then `detail`, then a bare JSON string, then a generic fallback.
async fn error_message(resp: reqwest::Response) -> String {
    match resp.json::<Value>().await {
        Ok(body) => body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| body.get("detail").and_then(Value::as_str))
            .map(str::to_owned)
            .or_else(|| body.as_str().map(str::to_owned))
            .unwrap_or_else(|| "Request failed.".to_string()),
        Err(_) => "Request failed.".to_string(),
    }
}
