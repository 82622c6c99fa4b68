//! # Video Info Fetchers
//!
//! The contract every video-source plugin (YouTube, Instagram) implements.
//! Plugins report failures as [`FetchError`]; the provided `describe` method
//! turns those into placeholder descriptions so callers never see an error.

use crate::{
    errors::FetchError,
    types::{FallbackReason, VideoDescription},
};
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait VideoInfoFetcher: Send + Sync {
    /// A short name used in logs (e.g., "youtube").
    fn name(&self) -> &'static str;

    /// The reason recorded when a network or decoding error occurs in this source.
    fn source_fallback(&self) -> FallbackReason;

    /// Fetches and composes the description text for `link`.
    async fn fetch(&self, link: &str) -> Result<String, FetchError>;

    /// Like `fetch`, but never fails: errors become a fallback description.
    async fn describe(&self, link: &str) -> VideoDescription {
        match self.fetch(link).await {
            Ok(text) => VideoDescription::fetched(text),
            Err(e) => {
                let reason = e.fallback_reason(self.source_fallback());
                warn!(fetcher = self.name(), error = %e, ?reason, "Falling back to placeholder description");
                VideoDescription::fallback(reason)
            }
        }
    }
}
