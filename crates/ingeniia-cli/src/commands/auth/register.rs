//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use ingeniia_core::AuthApi;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Email address of the new account
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Display name [default: the part of the email before '@']
    #[arg(long)]
    pub username: Option<String>,
}

pub async fn run(args: RegisterArgs, config: &ConfigArgs) -> Result<()> {
    let auth = config.auth_service()?;

    output::progress("Creating account...");

    let response = auth
        .register(&args.email, &args.password, args.username.as_deref())
        .await
        .context("Failed to register")?;

    output::success(&response.message);
    output::field("Email", &args.email);
    println!();
    println!("Run 'ingeniia auth verify --token <TOKEN>' with the token from the email.");

    Ok(())
}
