//! # Link Classifier Tests
//!
//! Routes links through `LinkClassifier` with distinguishable stub fetchers.

use async_trait::async_trait;
use quipster::{
    DescriptionOutcome, FallbackReason, FetchError, LinkClassifier, VideoInfoFetcher,
};
use std::sync::{Arc, Mutex};

/// A fetcher that records every link it sees and answers with a fixed result.
struct RecordingFetcher {
    name: &'static str,
    fallback: FallbackReason,
    result: fn() -> Result<String, FetchError>,
    calls: Mutex<Vec<String>>,
}

impl RecordingFetcher {
    fn new(
        name: &'static str,
        fallback: FallbackReason,
        result: fn() -> Result<String, FetchError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            fallback,
            result,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoInfoFetcher for RecordingFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn source_fallback(&self) -> FallbackReason {
        self.fallback
    }

    async fn fetch(&self, link: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(link.to_string());
        (self.result)()
    }
}

fn youtube_ok() -> Result<String, FetchError> {
    Ok("from youtube".to_string())
}

fn instagram_ok() -> Result<String, FetchError> {
    Ok("from instagram".to_string())
}

fn setup() -> (Arc<RecordingFetcher>, Arc<RecordingFetcher>, LinkClassifier) {
    let youtube = RecordingFetcher::new("youtube", FallbackReason::VideoLookupFailed, youtube_ok);
    let instagram =
        RecordingFetcher::new("instagram", FallbackReason::PostUnavailable, instagram_ok);
    let classifier = LinkClassifier::new(youtube.clone(), instagram.clone());
    (youtube, instagram, classifier)
}

#[tokio::test]
async fn test_youtube_links_route_to_youtube_fetcher() {
    let (youtube, instagram, classifier) = setup();

    for link in [
        "https://www.youtube.com/watch?v=ABC123",
        "https://youtu.be/ABC123",
        "https://www.youtube.com/shorts/XYZ789?feature=share",
        "shorts",
    ] {
        let description = classifier.describe(link).await;
        assert_eq!(description.text, "from youtube", "link: {link}");
        assert_eq!(description.outcome, DescriptionOutcome::Fetched);
    }

    assert_eq!(youtube.calls().len(), 4);
    assert!(instagram.calls().is_empty());
}

#[tokio::test]
async fn test_instagram_links_route_to_instagram_fetcher() {
    let (youtube, instagram, classifier) = setup();

    let description = classifier
        .describe("https://www.instagram.com/reel/Cabc123/")
        .await;

    assert_eq!(description.text, "from instagram");
    assert_eq!(
        instagram.calls(),
        vec!["https://www.instagram.com/reel/Cabc123/".to_string()]
    );
    assert!(youtube.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_links_use_generic_fallback() {
    let (youtube, instagram, classifier) = setup();

    for link in ["https://vimeo.com/1234", ""] {
        let description = classifier.describe(link).await;
        assert_eq!(description.text, "Funny or trending video");
        assert_eq!(
            description.outcome,
            DescriptionOutcome::Fallback(FallbackReason::UnsupportedLink)
        );
    }

    assert!(youtube.calls().is_empty());
    assert!(instagram.calls().is_empty());
}

#[tokio::test]
async fn test_fetch_errors_become_fallback_descriptions() {
    let youtube = RecordingFetcher::new("youtube", FallbackReason::VideoLookupFailed, || {
        Err(FetchError::MetadataStatus(404))
    });
    let instagram = RecordingFetcher::new("instagram", FallbackReason::PostUnavailable, || {
        Err(FetchError::Unexpected("boom".into()))
    });
    let classifier = LinkClassifier::new(youtube, instagram);

    let yt = classifier
        .describe("https://www.youtube.com/watch?v=ABC123")
        .await;
    assert_eq!(yt.text, "Funny YouTube video");

    let ig = classifier.describe("https://www.instagram.com/p/abc/").await;
    assert_eq!(ig.text, "Funny trending video");
    assert_eq!(
        ig.outcome,
        DescriptionOutcome::Fallback(FallbackReason::Unexpected)
    );
}
