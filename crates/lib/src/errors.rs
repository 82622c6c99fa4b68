use crate::types::FallbackReason;
use thiserror::Error;

/// Errors raised while talking to the comment-generation model.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned no candidates")]
    EmptyResponse,
}

/// Errors raised while turning comment text into audio.
#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Nothing to speak: input text is empty")]
    EmptyText,
    #[error("Failed to send request to speech provider: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Speech provider returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Speech provider response did not contain audio")]
    NoAudio,
    #[error("Failed to decode audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Failed to store audio clip: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors a video info fetcher can run into.
///
/// None of these ever reach the HTTP caller. Each variant is turned into a
/// placeholder description by [`FetchError::fallback_reason`], so the comment
/// pipeline always has something to work with.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),
    #[error("Invalid Instagram URL: {0}")]
    InvalidPostUrl(String),
    #[error("Metadata lookup returned status {0}")]
    MetadataStatus(u16),
    #[error("Post is not publicly available: {0}")]
    PostUnavailable(String),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Unexpected fetch failure: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Maps the error to the reason recorded on the fallback description.
    ///
    /// `Request` and `Decode` are source-specific: the caller decides which
    /// source raised them, so they are resolved against `source_reason`.
    pub fn fallback_reason(&self, source_reason: FallbackReason) -> FallbackReason {
        match self {
            FetchError::InvalidVideoUrl(_) => FallbackReason::InvalidVideoUrl,
            FetchError::MetadataStatus(_) => FallbackReason::MetadataUnavailable,
            FetchError::InvalidPostUrl(_) | FetchError::PostUnavailable(_) => {
                FallbackReason::PostUnavailable
            }
            FetchError::Request(_) | FetchError::Decode(_) => source_reason,
            FetchError::Unexpected(_) => FallbackReason::Unexpected,
        }
    }
}
