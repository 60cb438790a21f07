use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytmcp",
    about = "YouTube search and transcript tools over MCP",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Config file (default: ~/.config/ytmcp/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the MCP tools on stdin/stdout (default)
    Serve,

    /// Run one video search and print the results as JSON
    Search {
        /// Search query
        search_term: String,

        /// Number of videos to retrieve (clamped to 1..=50)
        #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
        num_videos: i64,
    },

    /// Fetch one transcript and print it as JSON
    Transcript {
        /// YouTube video URL or video ID
        video_url_or_title: String,
    },
}
