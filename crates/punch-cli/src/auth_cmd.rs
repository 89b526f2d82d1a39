//! Auth subcommands: login, logout, whoami.
//!
//! User-facing output uses writeln! to stdout (this is a CLI binary, not debug output).

use std::io::{self, Write};

use punch_core::api::ApiClient;

/// Auth subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum AuthAction {
    /// Log in with backend credentials.
    Login {
        /// Account email.
        #[arg(short, long)]
        email: String,
        /// Password; prompted interactively when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out and clear the stored session.
    Logout,
    /// Show the stored user summary and decoded roles.
    Whoami,
}

/// Execute an auth subcommand.
pub async fn run(action: AuthAction, client: &ApiClient) -> anyhow::Result<()> {
    match action {
        AuthAction::Login { email, password } => login(client, &email, password).await,
        AuthAction::Logout => logout(client),
        AuthAction::Whoami => {
            whoami(client);
            Ok(())
        }
    }
}

async fn login(client: &ApiClient, email: &str, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()?,
    };

    let resp = client.login(email, &password).await?;

    let mut out = io::stdout();
    match resp.user.and_then(|u| u.full_name) {
        Some(name) => writeln!(out, "Logged in as {name} ({email})")?,
        None => writeln!(out, "Logged in as {email}")?,
    }
    if client.session().roles().contains(&"ADMIN".to_string()) {
        writeln!(out, "Admin commands available: punch admin --help")?;
    }
    Ok(())
}

fn logout(client: &ApiClient) -> anyhow::Result<()> {
    client.session().clear()?;
    let mut out = io::stdout();
    writeln!(out, "Logged out")?;
    Ok(())
}

fn whoami(client: &ApiClient) {
    let mut out = io::stdout();
    match client.session().user() {
        Some(user) => {
            let _ = writeln!(out, "Logged in as: {}", user.full_name.as_deref().unwrap_or("?"));
            if let Some(email) = &user.email {
                let _ = writeln!(out, "Email: {email}");
            }
            let _ = writeln!(out, "Role: {}", user.role);
            let roles = client.session().roles();
            if !roles.is_empty() {
                let _ = writeln!(out, "Token roles: {}", roles.join(", "));
            }
        }
        None => {
            let _ = writeln!(out, "Not logged in");
        }
    }
}
