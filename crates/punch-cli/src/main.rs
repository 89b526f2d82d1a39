//! Punch CLI
//!
//! Terminal front end for the attendance tracker backend. Thin by
//! design: every command is a round trip to the REST API, with the
//! session guard in punch-core handling token refresh and expiry.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use punch_cli::admin_cmd::{self, AdminAction};
use punch_cli::attendance_cmd;
use punch_cli::auth_cmd::{self, AuthAction};
use punch_cli::profile_cmd::{self, ProfileAction};
use punch_core::api::ApiClient;
use punch_core::store::ConfigStore;

#[derive(Parser, Debug)]
#[command(name = "punch")]
#[command(version, about = "Attendance tracker CLI", long_about = None)]
struct Cli {
    /// Backend base URL (persisted after first use).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file path override.
    #[arg(long, global = true, env = "PUNCH_CONFIG", hide = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Authentication: login, logout, whoami.
    #[command(subcommand)]
    Auth(AuthAction),
    /// Check in for today.
    In,
    /// Check out for today.
    Out,
    /// Show today's attendance status (asks the backend).
    Status,
    /// Personal attendance history.
    Log {
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Profile: show, passwd.
    #[command(subcommand)]
    Profile(ProfileAction),
    /// Admin panel.
    #[command(subcommand)]
    Admin(AdminAction),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "punch=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::new(ConfigStore::default_path()?),
    };

    let base_url = resolve_base_url(&store, cli.base_url)?;
    debug!(%base_url, "resolved backend");
    let client = ApiClient::new(&base_url, store)?;

    match cli.command {
        Command::Auth(action) => auth_cmd::run(action, &client).await,
        Command::In => attendance_cmd::check_in(&client).await,
        Command::Out => attendance_cmd::check_out(&client).await,
        Command::Status => attendance_cmd::status(&client).await,
        Command::Log { page } => attendance_cmd::log(&client, page).await,
        Command::Profile(action) => profile_cmd::run(action, &client).await,
        Command::Admin(action) => admin_cmd::run(action, &client).await,
    }
    .map_err(annotate_session_expiry)
}

/// Pick the backend URL: an explicit flag wins and is persisted for
/// the next invocation; otherwise the stored one is used.
fn resolve_base_url(store: &ConfigStore, flag: Option<String>) -> anyhow::Result<String> {
    let mut config = store.load();
    if let Some(url) = flag {
        let url = url.trim_end_matches('/').to_string();
        config.base_url = Some(url.clone());
        store.save(&config)?;
        return Ok(url);
    }
    config
        .base_url
        .context("No base URL configured. Use --base-url <url>")
}

/// The CLI analogue of the redirect-to-login: tell the user how to
/// get a new session.
fn annotate_session_expiry(err: anyhow::Error) -> anyhow::Error {
    let expired = err
        .downcast_ref::<punch_core::Error>()
        .is_some_and(punch_core::Error::is_session_expired);
    if expired {
        err.context("Run `punch auth login` to start a new session")
    } else {
        err
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let url = resolve_base_url(&store, Some("https://attendance.test/".into())).unwrap();
        assert_eq!(url, "https://attendance.test");

        // Next invocation finds it without the flag.
        let url = resolve_base_url(&store, None).unwrap();
        assert_eq!(url, "https://attendance.test");
    }

    #[test]
    fn missing_base_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        assert!(resolve_base_url(&store, None).is_err());
    }

    #[test]
    fn cli_parses_log_page() {
        let cli = Cli::parse_from(["punch", "log", "--page", "2"]);
        assert!(matches!(cli.command, Command::Log { page: 2 }));
    }

    #[test]
    fn cli_parses_admin_logs_filters() {
        let cli = Cli::parse_from([
            "punch", "admin", "logs", "--start", "2025-10-01", "--end", "2025-10-31", "--page",
            "2",
        ]);
        match cli.command {
            Command::Admin(AdminAction::Logs {
                start, end, page, ..
            }) => {
                assert_eq!(start.as_deref(), Some("2025-10-01"));
                assert_eq!(end.as_deref(), Some("2025-10-31"));
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
