//! The two tool operations, as total functions returning records.

use eyre::{Result, bail};
use log::{debug, info, warn};

use crate::output::render_text;
use crate::search::{SearchBackend, VideoSearch};
use crate::select::select_track;
use crate::youtube::CaptionProvider;
use crate::{ErrorRecord, SearchHit, Segment, TranscriptOutcome, TranscriptResult, extract_video_id};

pub const DEFAULT_NUM_VIDEOS: i64 = 5;

pub const NO_TRANSCRIPTS_MESSAGE: &str = "No transcripts available for this video";

pub struct YouTubeService<S, C> {
    search: VideoSearch<S>,
    captions: C,
}

impl<S: SearchBackend, C: CaptionProvider> YouTubeService<S, C> {
    pub fn new(search: VideoSearch<S>, captions: C) -> Self {
        Self { search, captions }
    }

    #[cfg(test)]
    pub(crate) fn search_backend(&self) -> &S {
        self.search.backend()
    }

    pub async fn search_youtube_videos(&self, search_term: &str, num_videos: i64) -> Vec<SearchHit> {
        info!("search_youtube_videos: {search_term:?} (num_videos={num_videos})");
        self.search.search(search_term, num_videos).await
    }

    pub async fn get_youtube_transcript(&self, video_url_or_title: &str) -> TranscriptOutcome {
        info!("get_youtube_transcript: {video_url_or_title:?}");
        match self.transcript(video_url_or_title).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Transcript lookup failed: {e}");
                TranscriptOutcome::Error(ErrorRecord::new(format!(
                    "Failed to get transcript: {e}. Make sure the video has captions available and the video ID/URL is correct."
                )))
            }
        }
    }

    async fn transcript(&self, input: &str) -> Result<TranscriptOutcome> {
        let video_id = extract_video_id(input).unwrap_or_else(|| input.trim().to_string());
        if video_id.is_empty() {
            bail!("no video URL or ID given");
        }
        debug!("Resolved video ID: {video_id}");

        let segments = match self.fetch_segments(&video_id).await {
            Ok(Some(segments)) => segments,
            Ok(None) => return Ok(TranscriptOutcome::Error(ErrorRecord::new(NO_TRANSCRIPTS_MESSAGE))),
            Err(e) => {
                warn!("Caption lookup for {video_id} failed: {e}");
                return Ok(TranscriptOutcome::Error(ErrorRecord::new(format!(
                    "Could not find transcript for video ID: {video_id}. Error: {e}"
                ))));
            }
        };

        Ok(TranscriptOutcome::Transcript(TranscriptResult {
            transcript: render_text(&segments),
        }))
    }

    // None when the video has no tracks at all
    async fn fetch_segments(&self, video_id: &str) -> Result<Option<Vec<Segment>>> {
        let tracks = self.captions.list_tracks(video_id).await?;
        let Some(track) = select_track(&tracks) else {
            return Ok(None);
        };
        let segments = self.captions.fetch_segments(track).await?;
        debug!("Fetched {} segments ({} {})", segments.len(), track.kind, track.language_code);
        Ok(Some(segments))
    }
}
