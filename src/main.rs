use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use log::{info, warn};

mod cli;

use cli::{Cli, Command};
use ytmcp::config::{API_KEY_ENV, Config};
use ytmcp::mcp::McpServer;
use ytmcp::search::{DataApi, VideoSearch};
use ytmcp::service::YouTubeService;
use ytmcp::youtube::InnerTube;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytmcp.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    // stdout carries the protocol, so logs go to a file
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytmcp")
        .join("logs")
}

fn load_config(path: Option<&PathBuf>) -> Config {
    // missing or invalid config is not fatal
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("Ignoring config file: {e}");
        Config::default()
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());

    let api_key = config.api_key();
    if api_key.is_none() {
        warn!("{API_KEY_ENV} not set; YouTube search will not work");
        eprintln!("Warning: {API_KEY_ENV} environment variable not set. YouTube search functionality will not work.");
    }

    let client = reqwest::Client::new();
    let search = VideoSearch::new(api_key, DataApi::new(client.clone(), config.search_endpoint()));
    let captions = InnerTube::new(client, config.innertube_base());
    let service = YouTubeService::new(search, captions);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => McpServer::new(service).run().await?,
        Command::Search {
            search_term,
            num_videos,
        } => {
            let hits = service.search_youtube_videos(&search_term, num_videos).await;
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Command::Transcript { video_url_or_title } => {
            let outcome = service.get_youtube_transcript(&video_url_or_title).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
