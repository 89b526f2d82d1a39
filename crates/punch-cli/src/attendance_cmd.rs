//! Dashboard and attendance-log subcommands.
//!
//! `punch in` / `punch out` drive the single check-in/check-out cycle;
//! the backend owns the state machine and this side only reflects its
//! responses. `punch status` asks the authoritative status endpoint,
//! never the locally persisted hint.

use std::io::{self, Write};

use punch_core::api::ApiClient;
use punch_core::api::query::page_from_url;
use punch_core::api::types::CheckResponse;

use crate::fmt;

/// Execute `punch in`.
pub async fn check_in(client: &ApiClient) -> anyhow::Result<()> {
    let resp = client.check_in().await?;
    report_transition(&resp, "Checked in")
}

/// Execute `punch out`.
pub async fn check_out(client: &ApiClient) -> anyhow::Result<()> {
    let resp = client.check_out().await?;
    report_transition(&resp, "Checked out")
}

fn report_transition(resp: &CheckResponse, fallback: &str) -> anyhow::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "{}", resp.message.as_deref().unwrap_or(fallback))?;
    if let Some(session) = &resp.session {
        let logged = session.check_out.as_deref().unwrap_or(&session.check_in);
        writeln!(out, "Logged time: {}", fmt::local_time(logged))?;
    }
    Ok(())
}

/// Execute `punch status`.
pub async fn status(client: &ApiClient) -> anyhow::Result<()> {
    let status = client.attendance_status().await?;
    let mut out = io::stdout();
    fmt::write_status(&mut out, &status)?;
    Ok(())
}

/// Execute `punch log --page N`.
pub async fn log(client: &ApiClient, page: u32) -> anyhow::Result<()> {
    let page_no = page.max(1);
    let history = client.attendance_history(page_no).await?;

    let mut out = io::stdout();
    if history.results.is_empty() {
        writeln!(out, "No attendance records.")?;
        return Ok(());
    }
    fmt::write_session_table(&mut out, &history.results)?;
    fmt::write_pager(
        &mut out,
        page_no,
        history.count,
        history.next.as_deref().and_then(page_from_url),
        history.previous.as_deref().and_then(page_from_url),
    )?;
    Ok(())
}
