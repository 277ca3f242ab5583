//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, config: &ConfigArgs) -> Result<()> {
    let client = config.api_client()?;

    output::progress("Refreshing session...");

    let refreshed = client
        .refresh_access_token()
        .await
        .context("Failed to refresh session")?;

    if refreshed.is_none() {
        output::warning("Refresh rejected; stored tokens were cleared");
        anyhow::bail!("No active session. Run 'ingeniia auth login' first.");
    }

    output::success("Session refreshed successfully");

    Ok(())
}
