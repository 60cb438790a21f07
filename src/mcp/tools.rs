//! MCP tool definitions.

use super::protocol::Tool;
use serde_json::json;

pub const SEARCH_TOOL: &str = "search_youtube_videos";
pub const TRANSCRIPT_TOOL: &str = "get_youtube_transcript";

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_TOOL.to_string(),
            description: "Search YouTube videos based on a search term. \
                Returns a list of videos with title, video_id, channel, description, \
                published_at, thumbnail_url and video_url."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search_term": {
                        "type": "string",
                        "description": "The search query for YouTube videos"
                    },
                    "num_videos": {
                        "type": "integer",
                        "description": "Number of videos to retrieve (max 50)",
                        "default": 5
                    }
                },
                "required": ["search_term"]
            }),
        },
        Tool {
            name: TRANSCRIPT_TOOL.to_string(),
            description: "Get the transcript of a YouTube video as plain text. \
                Accepts a watch, youtu.be or embed URL, or a bare video ID."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "video_url_or_title": {
                        "type": "string",
                        "description": "YouTube video URL or video ID"
                    }
                },
                "required": ["video_url_or_title"]
            }),
        },
    ]
}
