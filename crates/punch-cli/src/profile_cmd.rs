//! Profile subcommands: show, passwd.

use std::io::{self, Write};

use anyhow::bail;
use punch_core::api::ApiClient;

use crate::fmt;

/// Profile subcommand actions.
#[derive(clap::Subcommand, Debug)]
pub enum ProfileAction {
    /// Show the employee profile.
    Show,
    /// Change the account password.
    Passwd,
}

/// Execute a profile subcommand.
pub async fn run(action: ProfileAction, client: &ApiClient) -> anyhow::Result<()> {
    match action {
        ProfileAction::Show => show(client).await,
        ProfileAction::Passwd => passwd(client).await,
    }
}

async fn show(client: &ApiClient) -> anyhow::Result<()> {
    let profile = client.profile().await?;
    let mut out = io::stdout();
    fmt::write_profile(&mut out, &profile)?;
    Ok(())
}

async fn passwd(client: &ApiClient) -> anyhow::Result<()> {
    let current = dialoguer::Password::new()
        .with_prompt("Current password")
        .interact()?;
    let new = dialoguer::Password::new()
        .with_prompt("New password")
        .interact()?;
    let confirm = dialoguer::Password::new()
        .with_prompt("Confirm new password")
        .interact()?;

    // Local check, nothing is sent on mismatch.
    if new != confirm {
        bail!(punch_core::Error::Validation(
            "New passwords do not match.".into()
        ));
    }

    let resp = client.change_password(&current, &new).await?;
    let mut out = io::stdout();
    writeln!(
        out,
        "{}",
        resp.message.as_deref().unwrap_or("Password changed successfully.")
    )?;
    Ok(())
}
