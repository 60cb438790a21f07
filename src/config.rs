use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_SEARCH_ENDPOINT;
use crate::youtube::DEFAULT_INNERTUBE_BASE;

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub search_endpoint: Option<String>,
    pub innertube_base: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytmcp/config.toml if it exists
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// The search credential: environment first, then the config file. Blank values count as unset.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }

    pub fn search_endpoint(&self) -> &str {
        self.search_endpoint.as_deref().unwrap_or(DEFAULT_SEARCH_ENDPOINT)
    }

    pub fn innertube_base(&self) -> &str {
        self.innertube_base
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or(DEFAULT_INNERTUBE_BASE)
    }
}

fn resolve_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
    [from_env, from_file]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytmcp")
        .join("config.toml")
}
