//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use ingeniia_core::Credentials;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, config: &ConfigArgs) -> Result<()> {
    let session = config.session()?;
    let credentials = Credentials::new(&args.email, &args.password);

    output::progress("Logging in...");

    let user = session
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", user.display_name());
    output::field("Email", &user.email);
    output::field("Store", &config.store_path()?.display().to_string());

    Ok(())
}
