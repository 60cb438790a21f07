use eyre::{Result, bail};
use log::{debug, warn};
use serde::Deserialize;

use crate::{ErrorRecord, SearchHit, VideoSummary};

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

pub const MIN_RESULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 50;

/// Descriptions longer than this many characters are cut and marked with "..."
pub const DESCRIPTION_LIMIT: usize = 300;

pub const MISSING_KEY_MESSAGE: &str =
    "YouTube API key not configured. Please set YOUTUBE_API_KEY environment variable.";

/// One bounded search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub max_results: u32,
}

impl SearchQuery {
    /// Build a query, clamping the requested count into `[1, 50]`
    pub fn new(text: impl Into<String>, requested: i64) -> Self {
        let max_results = requested.clamp(MIN_RESULTS as i64, MAX_RESULTS as i64) as u32;
        Self {
            text: text.into(),
            max_results,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    pub title: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub medium: Thumbnail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Remote capability that runs one page of a video search
#[allow(async_fn_in_trait)]
pub trait SearchBackend {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<SearchItem>>;
}

/// YouTube Data API v3 `search.list`
pub struct DataApi {
    client: reqwest::Client,
    endpoint: String,
}

impl DataApi {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn request(&self, api_key: &str, query: &SearchQuery) -> reqwest::RequestBuilder {
        let max_results = query.max_results.to_string();
        self.client.get(&self.endpoint).query(&[
            ("key", api_key),
            ("q", query.text.as_str()),
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("order", "relevance"),
        ])
    }
}

impl SearchBackend for DataApi {
    async fn search(&self, api_key: &str, query: &SearchQuery) -> Result<Vec<SearchItem>> {
        debug!("Searching YouTube: q={:?} maxResults={}", query.text, query.max_results);

        let resp = self.request(api_key, query).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("YouTube API returned {status}: {}", api_error_message(body));
        }

        let list: SearchListResponse = resp.json().await?;
        debug!("YouTube search returned {} items", list.items.len());
        Ok(list.items)
    }
}

/// The API's `error.message`, or the raw body when it is not an API error document
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Search adapter holding the injected credential
pub struct VideoSearch<B> {
    api_key: Option<String>,
    backend: B,
}

impl<B: SearchBackend> VideoSearch<B> {
    pub fn new(api_key: Option<String>, backend: B) -> Self {
        Self { api_key, backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run a search; failures come back as a single error record
    pub async fn search(&self, search_term: &str, num_videos: i64) -> Vec<SearchHit> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Search requested without a configured API key");
            return vec![SearchHit::Error(ErrorRecord::new(MISSING_KEY_MESSAGE))];
        };

        let query = SearchQuery::new(search_term, num_videos);

        match self.backend.search(api_key, &query).await {
            Ok(items) => items.into_iter().map(|item| SearchHit::Video(summarize(item))).collect(),
            Err(e) => {
                warn!("YouTube search failed: {e}");
                vec![SearchHit::Error(ErrorRecord::new(format!(
                    "Failed to search YouTube videos: {e}"
                )))]
            }
        }
    }
}

/// Shape one API item into a flat summary
pub fn summarize(item: SearchItem) -> VideoSummary {
    let video_url = format!("https://www.youtube.com/watch?v={}", item.id.video_id);
    VideoSummary {
        description: truncate_description(&item.snippet.description),
        video_id: item.id.video_id,
        title: item.snippet.title,
        channel: item.snippet.channel_title,
        published_at: item.snippet.published_at,
        thumbnail_url: item.snippet.thumbnails.medium.url,
        video_url,
    }
}

pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let head: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
