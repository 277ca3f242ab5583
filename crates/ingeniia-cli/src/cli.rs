//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::content::ContentCommand;
use crate::commands::predict::PredictArgs;
use crate::config::ConfigArgs;

/// Client for the ingeniia auth, content and credit-scoring services.
#[derive(Parser, Debug)]
#[command(name = "ingeniia")]
#[command(author, version = env!("INGENIIA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Browse lesson videos and code snippets
    Content(ContentCommand),

    /// Request a credit-risk prediction
    Predict(PredictArgs),
}
