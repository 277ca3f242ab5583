//! Verify command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Verification token from the email
    #[arg(long)]
    pub token: String,
}

pub async fn run(args: VerifyArgs, config: &ConfigArgs) -> Result<()> {
    let session = config.session()?;

    output::progress("Verifying email...");

    let user = session
        .verify_email(&args.token)
        .await
        .context("Failed to verify email")?;

    output::success("Email verified, signed in");
    println!();
    output::field("User", user.display_name());
    output::field("Email", &user.email);

    Ok(())
}
