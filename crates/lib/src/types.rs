//! # Core Types
//!
//! The small set of values that flow through the comment pipeline: where a
//! link points to, and the description that was derived from it.

use serde::Serialize;

/// The kind of video a link points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSource {
    YouTube,
    Instagram,
    Unknown,
}

impl VideoSource {
    /// Classifies a raw link. The first matching rule wins:
    /// YouTube markers, then Instagram, then `Unknown`.
    pub fn classify(link: &str) -> Self {
        if ["youtube.com", "youtu.be", "shorts"]
            .iter()
            .any(|marker| link.contains(marker))
        {
            VideoSource::YouTube
        } else if link.contains("instagram.com") {
            VideoSource::Instagram
        } else {
            VideoSource::Unknown
        }
    }
}

/// Why a placeholder description was used instead of fetched content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The link is neither YouTube nor Instagram.
    UnsupportedLink,
    /// No video id could be extracted from a YouTube link.
    InvalidVideoUrl,
    /// The YouTube lookup failed on the network or returned garbage.
    VideoLookupFailed,
    /// The oEmbed metadata endpoint answered with a non-success status.
    MetadataUnavailable,
    /// The Instagram post is private, missing, or could not be fetched.
    PostUnavailable,
    /// A fetcher failed in a way it did not classify itself.
    Unexpected,
}

impl FallbackReason {
    pub fn text(self) -> &'static str {
        match self {
            FallbackReason::UnsupportedLink => "Funny or trending video",
            FallbackReason::InvalidVideoUrl | FallbackReason::VideoLookupFailed => {
                "Funny YouTube short video"
            }
            FallbackReason::MetadataUnavailable => "Funny YouTube video",
            FallbackReason::PostUnavailable => "Funny Instagram Reel or meme video",
            FallbackReason::Unexpected => "Funny trending video",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DescriptionOutcome {
    Fetched,
    Fallback(FallbackReason),
}

/// A textual description of a video, plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoDescription {
    pub text: String,
    pub outcome: DescriptionOutcome,
}

impl VideoDescription {
    pub fn fetched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: DescriptionOutcome::Fetched,
        }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            text: reason.text().to_string(),
            outcome: DescriptionOutcome::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, DescriptionOutcome::Fallback(_))
    }
}
