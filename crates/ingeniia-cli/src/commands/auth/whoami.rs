//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, config: &ConfigArgs) -> Result<()> {
    let session = config.session()?;

    let state = session.init().await;
    let user = state
        .user
        .context("No active session. Run 'ingeniia auth login' first.")?;

    if args.json {
        return output::json_pretty(&user);
    }

    output::field("User", user.display_name());
    output::field("Email", &user.email);
    output::field("ID", &user.id);
    if let Some(verified) = user.is_verified {
        output::field("Verified", if verified { "yes" } else { "no" });
    }

    Ok(())
}
