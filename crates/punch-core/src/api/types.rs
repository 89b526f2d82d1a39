//! Wire types for the attendance backend.
//!
//! Every business entity here is backend-owned; the client only
//! deserializes what the backend returns and never treats its copy as
//! authoritative. Fields the client does not use are simply not
//! modelled.

use serde::{Deserialize, Serialize};

/// Response to `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// Response to `POST /token/refresh`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Cached summary of the authenticated user.
///
/// Used for client-side route gating only; the backend enforces
/// authorization independently on every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}

/// Generic `{ "message": ... }` acknowledgement body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// One attendance session as the backend reports it.
///
/// Created by check-in, completed by check-out or an admin
/// correction, removed by an admin delete. The client never mutates
/// one locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSession {
    pub id: u64,
    pub user_id: u64,
    pub date: String,
    pub check_in: String,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Response to a check-in or check-out call.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session: Option<AttendanceSession>,
}

/// Authoritative answer from the status endpoint; overrides any
/// locally persisted hint.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceStatus {
    pub checked_in: bool,
    #[serde(default)]
    pub session: Option<AttendanceSession>,
}

/// Standard pagination envelope.
///
/// `next`/`previous` are URLs (absolute or relative); their presence
/// drives the pager controls. Fetching another page is always a fresh
/// round trip.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: T,
}

impl<T> Paginated<T> {
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// `results` shape of the admin attendance-log listing, which nests
/// its rows under a `session` key.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogResults {
    #[serde(default)]
    pub session: Vec<AttendanceSession>,
}

/// Identity and employment fields of a user record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_of_joining: Option<String>,
}

/// Response to an admin user update.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<UserRecord>,
}

/// Profile page payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub total_working_hours: Option<String>,
    #[serde(default)]
    pub total_leave_applied: Option<String>,
    #[serde(default)]
    pub absent_days: Option<String>,
}
