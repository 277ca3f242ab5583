//! Auth subcommand implementations.

mod login;
mod logout;
mod refresh;
mod register;
mod verify;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::ConfigArgs;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Create an account; a verification email is sent
    Register(register::RegisterArgs),

    /// Confirm an email address and sign in
    Verify(verify::VerifyArgs),

    /// Sign in with email and password
    Login(login::LoginArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Sign out and forget the stored tokens
    Logout(logout::LogoutArgs),

    /// Exchange the refresh token for a new access token
    Refresh(refresh::RefreshArgs),
}

pub async fn handle(cmd: AuthCommand, config: &ConfigArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Register(args) => register::run(args, config).await,
        AuthSubcommand::Verify(args) => verify::run(args, config).await,
        AuthSubcommand::Login(args) => login::run(args, config).await,
        AuthSubcommand::Whoami(args) => whoami::run(args, config).await,
        AuthSubcommand::Logout(args) => logout::run(args, config).await,
        AuthSubcommand::Refresh(args) => refresh::run(args, config).await,
    }
}
