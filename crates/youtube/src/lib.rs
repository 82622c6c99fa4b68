//! # quipster-youtube: YouTube Info Fetcher
//!
//! Implements `VideoInfoFetcher` for YouTube links. A description is built
//! from the oEmbed title and uploader plus, when available, the English
//! caption transcript.

pub mod oembed;
pub mod transcript;

use async_trait::async_trait;
use quipster::{FallbackReason, FetchError, VideoInfoFetcher};
use reqwest::Client;
use tracing::{debug, info};

pub const DEFAULT_YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// Appended to descriptions too short to give the model anything to work with.
const SHORT_DESCRIPTION_HINT: &str = " (Funny video short clip, make creative reactions!)";
const SHORT_DESCRIPTION_LEN: usize = 50;

#[derive(Clone, Debug)]
pub struct YouTubeFetcher {
    client: Client,
    base_url: String,
}

impl YouTubeFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: DEFAULT_YOUTUBE_BASE_URL.to_string(),
        })
    }

    /// Points every YouTube request (watch page, player API, oEmbed) at another host.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl VideoInfoFetcher for YouTubeFetcher {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn source_fallback(&self) -> FallbackReason {
        FallbackReason::VideoLookupFailed
    }

    async fn fetch(&self, link: &str) -> Result<String, FetchError> {
        let video_id = extract_video_id(link)
            .ok_or_else(|| FetchError::InvalidVideoUrl(link.to_string()))?;
        info!(%video_id, "Fetching YouTube video info");

        let transcript =
            match transcript::fetch_transcript(&self.client, &self.base_url, &video_id).await {
                Ok(text) => text,
                Err(e) => {
                    debug!(%video_id, error = %e, "No transcript available");
                    String::new()
                }
            };

        let metadata = oembed::fetch_metadata(&self.client, &self.base_url, &video_id).await?;

        Ok(compose_description(
            &metadata.title,
            &metadata.author_name,
            &transcript,
        ))
    }
}

/// Extracts the video id from a YouTube link.
///
/// Recognizes `...v=<id>&...` and `.../shorts/<id>?...`, checked in that
/// order. Any other shape (including `youtu.be/<id>` share links) returns
/// `None`, as does an empty id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let id = if let Some((_, rest)) = url.split_once("v=") {
        rest.split('&').next()
    } else if let Some((_, rest)) = url.split_once("shorts/") {
        rest.split('?').next()
    } else {
        None
    }?;

    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Builds the description text handed to the comment generator.
pub fn compose_description(title: &str, author: &str, transcript: &str) -> String {
    let mut combined = format!("Video Title: {title}\nUploader: {author}\nTranscript: {transcript}");
    if combined.chars().count() < SHORT_DESCRIPTION_LEN {
        combined.push_str(SHORT_DESCRIPTION_HINT);
    }
    combined.trim().to_string()
}
