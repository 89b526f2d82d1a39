//! Output formatting helpers.
//!
//! Detail views write aligned `label: value` pairs; tables are
//! fixed-width columns. Backend timestamps are RFC 3339 UTC and are
//! shown in the operator's local time when they parse, verbatim when
//! they do not.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use punch_core::admin::department_label;
use punch_core::api::types::{AttendanceSession, AttendanceStatus, Profile, UserRecord};

/// Render a backend timestamp in local time, falling back to the raw
/// string for anything that is not RFC 3339.
pub fn local_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |dt| dt.with_timezone(&Local).format("%b %d, %Y %I:%M %p").to_string(),
    )
}

fn dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "—",
    }
}

pub fn write_status(w: &mut impl Write, status: &AttendanceStatus) -> io::Result<()> {
    let label = if status.checked_in {
        "Checked In"
    } else {
        "Not Checked In"
    };
    writeln!(w, "  Status:    {label}")?;
    if let Some(session) = &status.session {
        writeln!(w, "  Check-in:  {}", local_time(&session.check_in))?;
        if let Some(out) = &session.check_out {
            writeln!(w, "  Check-out: {}", local_time(out))?;
        }
        if let Some(duration) = &session.duration {
            writeln!(w, "  Duration:  {duration}")?;
        }
    }
    Ok(())
}

pub fn write_profile(w: &mut impl Write, profile: &Profile) -> io::Result<()> {
    writeln!(w, "  Name:        {}", dash(profile.full_name.as_deref()))?;
    writeln!(w, "  Employee ID: {}", dash(profile.employee_id.as_deref()))?;
    writeln!(w, "  Email:       {}", dash(profile.email.as_deref()))?;
    writeln!(w, "  Role:        {}", dash(profile.role.as_deref()))?;
    writeln!(
        w,
        "  Hours:       {}",
        dash(profile.total_working_hours.as_deref())
    )?;
    writeln!(
        w,
        "  Leave:       {}",
        dash(profile.total_leave_applied.as_deref())
    )?;
    writeln!(w, "  Absent:      {}", dash(profile.absent_days.as_deref()))?;
    Ok(())
}

pub fn write_session_table(w: &mut impl Write, sessions: &[AttendanceSession]) -> io::Result<()> {
    writeln!(
        w,
        "  {:<8} {:<8} {:<12} {:<22} {:<22} {:<10}",
        "ID", "User", "Date", "Check-In", "Check-Out", "Duration"
    )?;
    for s in sessions {
        writeln!(
            w,
            "  {:<8} {:<8} {:<12} {:<22} {:<22} {:<10}",
            s.id,
            s.user_id,
            s.date,
            local_time(&s.check_in),
            s.check_out.as_deref().map_or_else(|| "—".to_string(), local_time),
            s.duration.as_deref().unwrap_or("—"),
        )?;
    }
    Ok(())
}

/// `next`/`previous` are page numbers extracted from the envelope's
/// continuation URLs; `None` means that direction is exhausted.
pub fn write_pager(
    w: &mut impl Write,
    page: u32,
    count: u64,
    next: Option<u32>,
    previous: Option<u32>,
) -> io::Result<()> {
    let mut nav = Vec::new();
    if let Some(prev) = previous {
        nav.push(format!("--page {prev}"));
    }
    if let Some(next) = next {
        nav.push(format!("--page {next}"));
    }
    if nav.is_empty() {
        writeln!(w, "  Page {page} — {count} total")
    } else {
        writeln!(w, "  Page {page} — {count} total (more: {})", nav.join(", "))
    }
}

pub fn write_users_table(w: &mut impl Write, users: &[UserRecord]) -> io::Result<()> {
    writeln!(
        w,
        "  {:<6} {:<24} {:<28} {:<8} {:<18} {:<8}",
        "ID", "Name", "Email", "Role", "Department", "Status"
    )?;
    for u in users {
        writeln!(
            w,
            "  {:<6} {:<24} {:<28} {:<8} {:<18} {:<8}",
            u.id,
            dash(u.full_name.as_deref()),
            dash(u.email.as_deref()),
            dash(u.role.as_deref()),
            u.department
                .as_deref()
                .map_or_else(|| "—".to_string(), department_label),
            dash(u.status.as_deref()),
        )?;
    }
    Ok(())
}

pub fn write_user_detail(w: &mut impl Write, user: &UserRecord) -> io::Result<()> {
    writeln!(w, "  ID:          {}", user.id)?;
    writeln!(w, "  Name:        {}", dash(user.full_name.as_deref()))?;
    writeln!(w, "  Email:       {}", dash(user.email.as_deref()))?;
    writeln!(w, "  Role:        {}", dash(user.role.as_deref()))?;
    writeln!(w, "  Designation: {}", dash(user.designation.as_deref()))?;
    writeln!(
        w,
        "  Department:  {}",
        user.department
            .as_deref()
            .map_or_else(|| "—".to_string(), department_label)
    )?;
    writeln!(w, "  Status:      {}", dash(user.status.as_deref()))?;
    writeln!(w, "  Joined:      {}", dash(user.date_of_joining.as_deref()))?;
    Ok(())
}

pub fn write_stats(w: &mut impl Write, stats: &serde_json::Value) -> io::Result<()> {
    match stats.as_object() {
        Some(map) => {
            for (key, value) in map {
                writeln!(w, "  {key}: {value}")?;
            }
            Ok(())
        }
        None => writeln!(w, "  {stats}"),
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        assert_eq!(local_time("09:15 AM"), "09:15 AM");
    }

    #[test]
    fn rfc3339_timestamp_formats_as_local() {
        let out = local_time("2025-11-01T09:15:00Z");
        // Exact wall time depends on the host timezone; shape does not.
        assert!(out.contains("2025"));
        assert!(out.ends_with("AM") || out.ends_with("PM"));
    }

    #[test]
    fn status_renders_not_checked_in() {
        let out = render(|w| {
            write_status(
                w,
                &AttendanceStatus {
                    checked_in: false,
                    session: None,
                },
            )
        });
        assert!(out.contains("Not Checked In"));
    }

    #[test]
    fn session_table_shows_dashes_for_open_sessions() {
        let out = render(|w| {
            write_session_table(
                w,
                &[AttendanceSession {
                    id: 1,
                    user_id: 2,
                    date: "2025-10-30".into(),
                    check_in: "2025-10-30T09:00:00Z".into(),
                    check_out: None,
                    duration: None,
                }],
            )
        });
        assert!(out.contains('—'));
        assert!(out.contains("2025-10-30"));
    }

    #[test]
    fn pager_mentions_next_page_when_available() {
        let out = render(|w| write_pager(w, 2, 23, Some(3), Some(1)));
        assert!(out.contains("Page 2"));
        assert!(out.contains("--page 3"));
        assert!(out.contains("--page 1"));
    }

    #[test]
    fn pager_omits_nav_on_single_page() {
        let out = render(|w| write_pager(w, 1, 4, None, None));
        assert!(out.contains("Page 1 — 4 total"));
        assert!(!out.contains("--page"));
    }

    #[test]
    fn user_table_translates_department_codes() {
        let out = render(|w| {
            write_users_table(
                w,
                &[UserRecord {
                    id: 5,
                    full_name: Some("Alice".into()),
                    email: Some("alice@example.com".into()),
                    role: Some("user".into()),
                    designation: None,
                    department: Some("tec".into()),
                    status: Some("active".into()),
                    date_of_joining: None,
                }],
            )
        });
        assert!(out.contains("technology"));
    }
}
