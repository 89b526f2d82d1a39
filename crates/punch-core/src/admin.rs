//! Admin mutation payloads.
//!
//! The admin panel edits a local draft of a user record and submits a
//! sparse patch; it never sends untouched fields. Every destructive
//! admin call also carries the admin's own password, checked again by
//! the backend.

use chrono::{NaiveDateTime, SecondsFormat, TimeZone};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{Error, Result};

/// Department label/code table.
///
/// Labels are what the UI shows; codes are what the backend stores.
const DEPARTMENTS: &[(&str, &str)] = &[
    ("technology", "tec"),
    ("developer", "dev"),
    ("ai engineer", "aie"),
    ("graphic designing", "grd"),
];

/// Backend code for a human-readable department label. Unknown labels
/// pass through unchanged so the backend gets the final say.
pub fn department_code(label: &str) -> String {
    let needle = label.to_lowercase();
    DEPARTMENTS
        .iter()
        .find(|(l, _)| *l == needle)
        .map_or_else(|| label.to_string(), |(_, code)| (*code).to_string())
}

/// Display label for a backend department code.
pub fn department_label(code: &str) -> String {
    DEPARTMENTS
        .iter()
        .find(|(_, c)| *c == code)
        .map_or_else(|| code.to_string(), |(label, _)| (*label).to_string())
}

/// All known department labels, for prompts and usage text.
pub fn department_labels() -> Vec<&'static str> {
    DEPARTMENTS.iter().map(|(label, _)| *label).collect()
}

/// Locally editable draft of a user record. Empty fields mean
/// "unchanged" and are left out of the patch.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub designation: String,
    pub department: String,
    pub status: String,
    pub date_of_joining: String,
}

/// Build the sparse `PATCH /admin/user/{id}` body.
///
/// Keeps only non-empty draft fields, maps the department label to
/// its backend code, and attaches the admin password. Fails locally,
/// before any request, when the password is missing or the patch
/// would carry nothing but the password.
pub fn build_user_patch(draft: &UserDraft, admin_password: &str) -> Result<Value> {
    if admin_password.is_empty() {
        return Err(Error::Validation("Admin password is required.".into()));
    }

    let mut patch = Map::new();
    let fields = [
        ("full_name", &draft.full_name),
        ("email", &draft.email),
        ("role", &draft.role),
        ("designation", &draft.designation),
        ("status", &draft.status),
        ("date_of_joining", &draft.date_of_joining),
    ];
    for (key, value) in fields {
        let value = value.trim();
        if !value.is_empty() {
            patch.insert(key.to_string(), json!(value));
        }
    }
    let department = draft.department.trim();
    if !department.is_empty() {
        patch.insert("department".to_string(), json!(department_code(department)));
    }

    if patch.is_empty() {
        return Err(Error::Validation("No changes to update.".into()));
    }

    patch.insert("admin_password".to_string(), json!(admin_password));
    Ok(Value::Object(patch))
}

/// Registration payload for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub designation: String,
    pub department: String,
    pub date_of_joining: String,
}

/// Build the `PATCH /admin/attendance/correction/{id}` body.
///
/// The operator types a naive local date-time (`YYYY-MM-DDTHH:MM`,
/// seconds optional); the wire carries an absolute UTC instant.
pub fn correction_payload(local_checkout: &str, admin_password: &str) -> Result<Value> {
    if admin_password.is_empty() {
        return Err(Error::Validation("Admin password is required.".into()));
    }
    let utc = local_to_utc(local_checkout, &chrono::Local)?;
    Ok(json!({
        "check_out": utc,
        "admin_password": admin_password,
    }))
}

/// Interpret a naive date-time in `tz` and render it as UTC RFC 3339.
fn local_to_utc<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String> {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            Error::Validation(format!(
                "Invalid date-time '{input}', expected YYYY-MM-DDTHH:MM"
            ))
        })?;
    let instant = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| Error::Validation(format!("'{input}' does not exist in the local timezone")))?;
    Ok(instant
        .with_timezone(&chrono::Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn department_labels_map_to_codes() {
        assert_eq!(department_code("technology"), "tec");
        assert_eq!(department_code("AI Engineer"), "aie");
        assert_eq!(department_code("graphic designing"), "grd");
    }

    #[test]
    fn unknown_department_passes_through() {
        assert_eq!(department_code("operations"), "operations");
        assert_eq!(department_label("ops"), "ops");
    }

    #[test]
    fn codes_map_back_to_labels() {
        for (label, code) in [("technology", "tec"), ("developer", "dev")] {
            assert_eq!(department_label(code), label);
        }
    }

    #[test]
    fn empty_draft_is_rejected_locally() {
        let err = build_user_patch(&UserDraft::default(), "hunter2").unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "No changes to update."));
    }

    #[test]
    fn whitespace_only_fields_count_as_empty() {
        let draft = UserDraft {
            full_name: "   ".into(),
            ..Default::default()
        };
        assert!(build_user_patch(&draft, "hunter2").is_err());
    }

    #[test]
    fn missing_admin_password_is_rejected() {
        let draft = UserDraft {
            full_name: "Alice".into(),
            ..Default::default()
        };
        let err = build_user_patch(&draft, "").unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m == "Admin password is required."));
    }

    #[test]
    fn patch_keeps_only_non_empty_fields() {
        let draft = UserDraft {
            full_name: "Alice".into(),
            department: "technology".into(),
            ..Default::default()
        };
        let patch = build_user_patch(&draft, "hunter2").unwrap();
        assert_eq!(
            patch,
            json!({
                "full_name": "Alice",
                "department": "tec",
                "admin_password": "hunter2",
            })
        );
    }

    #[test]
    fn correction_requires_password() {
        let err = correction_payload("2025-10-01T18:00", "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn correction_rejects_garbage_datetime() {
        let err = correction_payload("yesterday-ish", "hunter2").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn naive_datetime_converts_through_offset_to_utc() {
        // UTC+6: 18:00 local is 12:00 UTC.
        let tz = FixedOffset::east_opt(6 * 3600).unwrap();
        let utc = local_to_utc("2025-10-01T18:00", &tz).unwrap();
        assert_eq!(utc, "2025-10-01T12:00:00.000Z");
    }

    #[test]
    fn seconds_are_accepted_when_present() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let utc = local_to_utc("2025-10-01T18:00:30", &tz).unwrap();
        assert_eq!(utc, "2025-10-01T18:00:30.000Z");
    }
}
