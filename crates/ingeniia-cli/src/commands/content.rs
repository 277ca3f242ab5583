//! Content subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use ingeniia_core::Topic;

use crate::config::ConfigArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ContentCommand {
    #[command(subcommand)]
    pub command: ContentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ContentSubcommand {
    /// List lesson videos for a topic
    Videos(TopicArgs),

    /// List code snippets for a topic
    Snippets(TopicArgs),
}

#[derive(Args, Debug)]
pub struct TopicArgs {
    /// Topic: mlp, cnn or rnn
    pub topic: Topic,

    /// Print the raw list as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(cmd: ContentCommand, config: &ConfigArgs) -> Result<()> {
    match cmd.command {
        ContentSubcommand::Videos(args) => videos(args, config).await,
        ContentSubcommand::Snippets(args) => snippets(args, config).await,
    }
}

async fn videos(args: TopicArgs, config: &ConfigArgs) -> Result<()> {
    let content = config.content_service()?;

    let videos = content
        .videos_by_topic(args.topic)
        .await
        .with_context(|| format!("Failed to list videos for {}", args.topic))?;

    if args.json {
        return output::json_pretty(&videos);
    }

    if videos.is_empty() {
        println!("No videos for {}", args.topic);
        return Ok(());
    }

    for video in &videos {
        println!(
            "{} {}",
            video.title.bold(),
            format!("({} min)", video.duration_minutes).dimmed()
        );
        output::field("  URL", &video.watch_url());
        if let Some(whiteboard) = &video.whiteboard {
            output::field("  Whiteboard", &whiteboard.file_url);
        }
    }

    Ok(())
}

async fn snippets(args: TopicArgs, config: &ConfigArgs) -> Result<()> {
    let content = config.content_service()?;

    let snippets = content
        .snippets_by_topic(args.topic)
        .await
        .with_context(|| format!("Failed to list snippets for {}", args.topic))?;

    if args.json {
        return output::json_pretty(&snippets);
    }

    if snippets.is_empty() {
        println!("No snippets for {}", args.topic);
        return Ok(());
    }

    for snippet in &snippets {
        println!(
            "{} {}",
            snippet.title.bold(),
            format!("[{}]", snippet.language).dimmed()
        );
        output::field("  Source", &snippet.github_url);
    }

    Ok(())
}
