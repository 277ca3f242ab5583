//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, config: &ConfigArgs) -> Result<()> {
    let session = config.session()?;

    session.logout().await;

    output::success("Logged out");

    Ok(())
}
