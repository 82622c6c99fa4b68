use crate::{
    fetch::VideoInfoFetcher,
    types::{FallbackReason, VideoDescription, VideoSource},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Routes a link to the fetcher for its video source.
#[derive(Clone)]
pub struct LinkClassifier {
    youtube: Arc<dyn VideoInfoFetcher>,
    instagram: Arc<dyn VideoInfoFetcher>,
}

impl LinkClassifier {
    pub fn new(youtube: Arc<dyn VideoInfoFetcher>, instagram: Arc<dyn VideoInfoFetcher>) -> Self {
        Self { youtube, instagram }
    }

    /// Produces a description for `link`. Never fails.
    pub async fn describe(&self, link: &str) -> VideoDescription {
        let source = VideoSource::classify(link);
        debug!(?source, link, "Classified link");

        let description = match source {
            VideoSource::YouTube => self.youtube.describe(link).await,
            VideoSource::Instagram => self.instagram.describe(link).await,
            VideoSource::Unknown => VideoDescription::fallback(FallbackReason::UnsupportedLink),
        };

        info!(?source, outcome = ?description.outcome, "Derived video description");
        description
    }
}
