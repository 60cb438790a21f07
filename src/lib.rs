pub mod config;
pub mod mcp;
pub mod output;
pub mod search;
pub mod select;
pub mod service;
pub mod youtube;

use serde::Serialize;

/// A single captioned segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// One search hit, shaped for the tool caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail_url: String,
    pub video_url: String,
}

/// Cleaned plain-text transcript of one video
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptResult {
    pub transcript: String,
}

/// Failure surfaced as data rather than as a transport error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchHit {
    Video(VideoSummary),
    Error(ErrorRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranscriptOutcome {
    Transcript(TranscriptResult),
    Error(ErrorRecord),
}

/// Extract a video ID from a YouTube URL.
///
/// Recognizes `youtu.be/ID`, `youtube.com/watch?v=ID` and `youtube.com/embed/ID`.
/// Anything else (including a bare ID) yields `None` and the caller decides what to do.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    if !input.contains("youtube.com") && !input.contains("youtu.be") {
        return None;
    }

    let id = if let Some((_, rest)) = input.rsplit_once("youtu.be/") {
        before_query(rest).to_string()
    } else if input.contains("watch?v=") {
        watch_param(input)?
    } else if let Some((_, rest)) = input.rsplit_once("/embed/") {
        before_query(rest).to_string()
    } else {
        return None;
    };

    Some(id).filter(|id| !id.is_empty())
}

fn before_query(s: &str) -> &str {
    s.split('?').next().unwrap_or(s)
}

// First non-empty `v` parameter; a watch URL without one resolves to nothing
fn watch_param(input: &str) -> Option<String> {
    let (_, query) = input.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "v" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_with_query() {
        assert_eq!(extract_video_id("https://youtu.be/abc123?t=5"), Some("abc123".to_string()));
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=xyz789"),
            Some("xyz789".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_param_not_first() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=&list=PL1&v=late42"),
            Some("late42".to_string())
        );
    }

    #[test]
    fn test_watch_url_without_value() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=#frag"), None);
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_link_wins_over_watch() {
        assert_eq!(
            extract_video_id("https://youtu.be/short1?watch?v=other"),
            Some("short1".to_string())
        );
    }

    #[test]
    fn test_unrecognized_youtube_path() {
        assert_eq!(extract_video_id("https://www.youtube.com/@somechannel"), None);
        assert_eq!(extract_video_id("https://youtu.be/"), None);
    }

    #[test]
    fn test_bare_id_is_not_extracted() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_free_text() {
        assert_eq!(extract_video_id("never gonna give you up"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(
            extract_video_id("  https://youtu.be/dQw4w9WgXcQ  "),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_error_record_serializes_flat() {
        let hit = SearchHit::Error(ErrorRecord::new("boom"));
        assert_eq!(serde_json::to_string(&hit).unwrap(), r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_transcript_serializes_under_transcript_key() {
        let outcome = TranscriptOutcome::Transcript(TranscriptResult {
            transcript: "Hello world".to_string(),
        });
        assert_eq!(serde_json::to_string(&outcome).unwrap(), r#"{"transcript":"Hello world"}"#);
    }
}
