//! yt-data - command-line front end for the YouTube Data API v3 client.
//!
//! Runs one API operation and prints the JSON result to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yt_data::{Config, Limit, YouTube};

#[derive(Parser)]
#[command(name = "yt-data")]
#[command(about = "Query the YouTube Data API v3 and print the JSON response")]
struct Cli {
    /// API key (overrides the config file and YOUTUBE_API_KEY)
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Path to a JSONC config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Video details by ID
    Video { id: String },
    /// Channel by legacy username
    ChannelByUsername { username: String },
    /// Channel by ID
    Channel { id: String },
    /// Playlist by ID
    Playlist { id: String },
    /// All items of a playlist
    PlaylistItems {
        id: String,
        /// Continuation token to start from
        #[arg(long)]
        page_token: Option<String>,
        /// Stop after this many items
        #[arg(long)]
        max: Option<usize>,
    },
    /// All comment threads of a video
    CommentThreads {
        video_id: String,
        /// Continuation token to start from
        #[arg(long)]
        page_token: Option<String>,
        /// Stop after this many threads
        #[arg(long)]
        max: Option<usize>,
    },
    /// All comment threads related to a channel
    ChannelCommentThreads {
        channel_id: String,
        /// Continuation token to start from
        #[arg(long)]
        page_token: Option<String>,
        /// Stop after this many threads
        #[arg(long)]
        max: Option<usize>,
    },
    /// Comment by ID
    Comment { id: String },
    /// Free-text search
    Search {
        query: String,
        #[arg(short = 'n', long, default_value_t = 25)]
        max_results: u32,
    },
    /// Videos related to a video
    Related {
        video_id: String,
        #[arg(short = 'n', long, default_value_t = 25)]
        max_results: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    if let Some(key) = cli.key {
        config.api_key = key;
    }

    let youtube = YouTube::from_config(&config).context("Failed to create YouTube client")?;

    let result = match run(&youtube, cli.command).await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            eprintln!("{}", serde_json::to_string_pretty(&e.payload())?);
            std::process::exit(1);
        }
    };

    let output = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", output);

    Ok(())
}

/// Dispatch one subcommand to the matching client operation.
async fn run(youtube: &YouTube, command: Command) -> Result<Value, yt_data::Error> {
    match command {
        Command::Video { id } => youtube.video_by_id(&id).await,
        Command::ChannelByUsername { username } => youtube.channel_by_username(&username).await,
        Command::Channel { id } => youtube.channel_by_id(&id).await,
        Command::Playlist { id } => youtube.playlist_by_id(&id).await,
        Command::PlaylistItems {
            id,
            page_token,
            max,
        } => youtube
            .playlist_items_by_id(&id, page_token.as_deref(), Limit::from(max))
            .await
            .map(Value::from),
        Command::CommentThreads {
            video_id,
            page_token,
            max,
        } => youtube
            .comment_threads_by_video_id(&video_id, page_token.as_deref(), Limit::from(max))
            .await
            .map(Value::from),
        Command::ChannelCommentThreads {
            channel_id,
            page_token,
            max,
        } => youtube
            .comment_threads_by_channel_id(&channel_id, page_token.as_deref(), Limit::from(max))
            .await
            .map(Value::from),
        Command::Comment { id } => youtube.comment_by_id(&id).await,
        Command::Search { query, max_results } => youtube.search(&query, max_results).await,
        Command::Related {
            video_id,
            max_results,
        } => youtube.related(&video_id, max_results).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_comment_threads() {
        let cli = Cli::parse_from([
            "yt-data",
            "comment-threads",
            "abc",
            "--max",
            "3",
            "--key",
            "K",
        ]);
        assert_eq!(cli.key.as_deref(), Some("K"));
        match cli.command {
            Command::CommentThreads {
                video_id,
                page_token,
                max,
            } => {
                assert_eq!(video_id, "abc");
                assert!(page_token.is_none());
                assert_eq!(max, Some(3));
            }
            _ => panic!("wrong subcommand"),
        }
    }
}
