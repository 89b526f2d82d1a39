//! Admin panel subcommands.
//!
//! Everything here maps to an admin endpoint: user management,
//! attendance-log querying with export, attendance correction, system
//! stats, user registration, and the unauthenticated health probe.
//! The role check is advisory navigation gating; the backend enforces
//! authorization on every call regardless.

use std::io::{self, Write};

use anyhow::bail;
use punch_core::admin::{self, NewUser, UserDraft};
use punch_core::api::query::page_from_url;
use punch_core::api::{ApiClient, LogFilter};
use punch_core::export::{self, ExportFormat};

use crate::fmt;

/// Admin subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AdminAction {
    /// List all users.
    Users,
    /// Show one user record.
    User {
        /// User ID.
        id: u64,
    },
    /// Update a user from a sparse set of flags.
    Update {
        /// User ID.
        id: u64,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        /// Department label (e.g. "technology", "ai engineer").
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Date of joining (`YYYY-MM-DD`).
        #[arg(long)]
        joined: Option<String>,
    },
    /// Delete a user.
    Delete {
        /// User ID.
        id: u64,
    },
    /// Query attendance logs.
    Logs {
        /// Today's sessions only; overrides --date and the range.
        #[arg(long)]
        today: bool,
        /// Exact date (`YYYY-MM-DD`); overrides the range.
        #[arg(long)]
        date: Option<String>,
        /// Range start (`YYYY-MM-DD`).
        #[arg(long)]
        start: Option<String>,
        /// Range end (`YYYY-MM-DD`).
        #[arg(long)]
        end: Option<String>,
        /// Restrict to one user ID.
        #[arg(long)]
        user: Option<u64>,
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Write the loaded page to a file (csv or excel).
        #[arg(long)]
        export: Option<ExportFormat>,
    },
    /// Correct the checkout time of an attendance session.
    Correct {
        /// Attendance session ID.
        session_id: u64,
        /// New checkout as local time (`YYYY-MM-DDTHH:MM`).
        #[arg(long)]
        checkout: String,
    },
    /// Delete an attendance session.
    RmSession {
        /// Attendance session ID.
        session_id: u64,
    },
    /// Show system statistics.
    Stats,
    /// Register a new user.
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "user")]
        role: String,
        #[arg(long, default_value = "")]
        designation: String,
        /// Department label, mapped to its backend code.
        #[arg(long, default_value = "")]
        department: String,
        /// Date of joining (`YYYY-MM-DD`).
        #[arg(long, default_value = "")]
        joined: String,
    },
    /// Probe the backend health endpoint (no auth).
    Ping,
}

/// Execute an admin subcommand.
pub async fn run(action: AdminAction, client: &ApiClient) -> anyhow::Result<()> {
    // The ping probe is deliberately open to everyone.
    if !matches!(action, AdminAction::Ping) {
        require_admin(client)?;
    }

    match action {
        AdminAction::Users => users(client).await,
        AdminAction::User { id } => user(client, id).await,
        AdminAction::Update {
            id,
            full_name,
            email,
            role,
            designation,
            department,
            status,
            joined,
        } => {
            let draft = UserDraft {
                full_name: full_name.unwrap_or_default(),
                email: email.unwrap_or_default(),
                role: role.unwrap_or_default(),
                designation: designation.unwrap_or_default(),
                department: department.unwrap_or_default(),
                status: status.unwrap_or_default(),
                date_of_joining: joined.unwrap_or_default(),
            };
            update(client, id, &draft).await
        }
        AdminAction::Delete { id } => delete(client, id).await,
        AdminAction::Logs {
            today,
            date,
            start,
            end,
            user,
            page,
            export,
        } => {
            let filter = LogFilter {
                user,
                today_only: today,
                date,
                start,
                end,
                page,
            };
            logs(client, &filter, export).await
        }
        AdminAction::Correct {
            session_id,
            checkout,
        } => correct(client, session_id, &checkout).await,
        AdminAction::RmSession { session_id } => rm_session(client, session_id).await,
        AdminAction::Stats => stats(client).await,
        AdminAction::Register {
            full_name,
            email,
            role,
            designation,
            department,
            joined,
        } => {
            register(
                client,
                NewUser {
                    full_name,
                    email,
                    password: String::new(),
                    role,
                    designation,
                    department: admin::department_code(&department),
                    date_of_joining: joined,
                },
            )
            .await
        }
        AdminAction::Ping => ping(client).await,
    }
}

/// Client-side gate mirroring the admin route guard. Not a security
/// boundary.
fn require_admin(client: &ApiClient) -> anyhow::Result<()> {
    let roles = client.session().roles();
    let summary_role = client.session().user().map(|u| u.role.to_uppercase());
    if roles.iter().any(|r| r == "ADMIN") || summary_role.as_deref() == Some("ADMIN") {
        return Ok(());
    }
    bail!("Admin role required for this command");
}

fn prompt_admin_password() -> anyhow::Result<String> {
    Ok(dialoguer::Password::new()
        .with_prompt("Admin password")
        .interact()?)
}

async fn users(client: &ApiClient) -> anyhow::Result<()> {
    let users = client.list_users().await?;
    let mut out = io::stdout();
    if users.is_empty() {
        writeln!(out, "No users.")?;
        return Ok(());
    }
    fmt::write_users_table(&mut out, &users)?;
    Ok(())
}

async fn user(client: &ApiClient, id: u64) -> anyhow::Result<()> {
    let record = client.user_detail(id).await?;
    let mut out = io::stdout();
    fmt::write_user_detail(&mut out, &record)?;
    Ok(())
}

async fn update(client: &ApiClient, id: u64, draft: &UserDraft) -> anyhow::Result<()> {
    let admin_password = prompt_admin_password()?;
    // Fails locally on an empty patch; no request goes out.
    let patch = admin::build_user_patch(draft, &admin_password)?;

    let resp = client.update_user(id, patch).await?;
    let mut out = io::stdout();
    writeln!(out, "{}", resp.message.as_deref().unwrap_or("User updated."))?;
    if let Some(record) = &resp.data {
        fmt::write_user_detail(&mut out, record)?;
    }
    Ok(())
}

async fn delete(client: &ApiClient, id: u64) -> anyhow::Result<()> {
    let admin_password = prompt_admin_password()?;
    let resp = client.delete_user(id, &admin_password).await?;
    let mut out = io::stdout();
    writeln!(out, "{}", resp.message.as_deref().unwrap_or("User deleted."))?;
    Ok(())
}

async fn logs(
    client: &ApiClient,
    filter: &LogFilter,
    export: Option<ExportFormat>,
) -> anyhow::Result<()> {
    let page = client.attendance_logs(filter).await?;
    let sessions = &page.results.session;

    let mut out = io::stdout();
    if sessions.is_empty() {
        writeln!(out, "No sessions match the filter.")?;
        return Ok(());
    }

    fmt::write_session_table(&mut out, sessions)?;
    fmt::write_pager(
        &mut out,
        filter.page.max(1),
        page.count,
        page.next.as_deref().and_then(page_from_url),
        page.previous.as_deref().and_then(page_from_url),
    )?;

    if let Some(format) = export {
        // Exports only what was loaded, not the full result set.
        let sheet = export::attendance_sheet(sessions);
        std::fs::write(format.file_name(), sheet)?;
        writeln!(out, "Exported {} rows to {}", sessions.len(), format.file_name())?;
    }
    Ok(())
}

async fn correct(client: &ApiClient, session_id: u64, checkout: &str) -> anyhow::Result<()> {
    let admin_password = prompt_admin_password()?;
    let payload = admin::correction_payload(checkout, &admin_password)?;
    client.correct_attendance(session_id, payload).await?;

    let mut out = io::stdout();
    writeln!(out, "Attendance corrected successfully.")?;

    // Refetch instead of patching the local view.
    let page = client.attendance_logs(&LogFilter::default()).await?;
    fmt::write_session_table(&mut out, &page.results.session)?;
    Ok(())
}

async fn rm_session(client: &ApiClient, session_id: u64) -> anyhow::Result<()> {
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("Delete attendance session {session_id}?"))
        .default(false)
        .interact()?;
    if !confirmed {
        let mut out = io::stdout();
        writeln!(out, "Aborted.")?;
        return Ok(());
    }

    let admin_password = prompt_admin_password()?;
    let resp = client.delete_attendance(session_id, &admin_password).await?;
    let mut out = io::stdout();
    writeln!(
        out,
        "{}",
        resp.message
            .as_deref()
            .unwrap_or("Attendance session deleted successfully.")
    )?;
    Ok(())
}

async fn stats(client: &ApiClient) -> anyhow::Result<()> {
    let stats = client.system_stats().await?;
    let mut out = io::stdout();
    fmt::write_stats(&mut out, &stats)?;
    Ok(())
}

async fn register(client: &ApiClient, mut new_user: NewUser) -> anyhow::Result<()> {
    new_user.password = dialoguer::Password::new()
        .with_prompt("New user's password")
        .interact()?;

    let resp = client.register_user(&new_user).await?;
    let mut out = io::stdout();
    writeln!(
        out,
        "{}",
        resp.message.as_deref().unwrap_or("User registered successfully!")
    )?;
    Ok(())
}

async fn ping(client: &ApiClient) -> anyhow::Result<()> {
    let body = client.ping().await?;
    let mut out = io::stdout();
    match body.as_str() {
        Some(text) => writeln!(out, "{text}")?,
        None => writeln!(out, "{body}")?,
    }
    Ok(())
}
