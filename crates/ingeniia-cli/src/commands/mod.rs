//! Subcommand implementations.

pub mod auth;
pub mod content;
pub mod predict;
