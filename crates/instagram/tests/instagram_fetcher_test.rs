//! # Instagram Fetcher Tests
//!
//! Runs `InstagramFetcher` against a mock GraphQL endpoint.

use quipster::{DescriptionOutcome, FallbackReason, VideoInfoFetcher};
use quipster_instagram::InstagramFetcher;
use serde_json::json;
use std::sync::Once;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

fn fetcher_for(server: &MockServer) -> InstagramFetcher {
    InstagramFetcher::new().unwrap().with_base_url(server.uri())
}

fn media_with_captions(captions: &[&str]) -> serde_json::Value {
    let edges: Vec<_> = captions
        .iter()
        .map(|text| json!({ "node": { "text": text } }))
        .collect();
    json!({
        "data": {
            "xdt_shortcode_media": {
                "shortcode": "Cabc123",
                "edge_media_to_caption": { "edges": edges }
            }
        },
        "status": "ok"
    })
}

#[tokio::test]
async fn test_describe_returns_caption() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/query"))
        .and(header("X-IG-App-ID", "936619743392459"))
        .and(body_string_contains("Cabc123"))
        .and(body_string_contains("doc_id="))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(media_with_captions(&["Monday mood 😴", "ignored"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    // --- 2. Act ---
    let description = fetcher_for(&server)
        .describe("https://www.instagram.com/reel/Cabc123/")
        .await;

    // --- 3. Assert ---
    assert_eq!(description.outcome, DescriptionOutcome::Fetched);
    assert_eq!(description.text, "Instagram Reel Caption: Monday mood 😴");
}

#[tokio::test]
async fn test_missing_caption_uses_default_text() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_with_captions(&[])))
        .mount(&server)
        .await;

    // --- 2. Act ---
    let description = fetcher_for(&server)
        .describe("https://www.instagram.com/p/Cabc123/")
        .await;

    // --- 3. Assert ---
    assert_eq!(
        description.text,
        "Instagram Reel Caption: Funny Instagram video"
    );
}

#[tokio::test]
async fn test_private_post_falls_back() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "xdt_shortcode_media": null },
            "status": "ok"
        })))
        .mount(&server)
        .await;

    // --- 2. Act ---
    let description = fetcher_for(&server)
        .describe("https://www.instagram.com/reel/Cprivate1/")
        .await;

    // --- 3. Assert ---
    assert_eq!(description.text, "Funny Instagram Reel or meme video");
    assert_eq!(
        description.outcome,
        DescriptionOutcome::Fallback(FallbackReason::PostUnavailable)
    );
}

#[tokio::test]
async fn test_rejected_request_falls_back() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql/query"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Please wait a few minutes before you try again.",
            "require_login": true,
            "status": "fail"
        })))
        .mount(&server)
        .await;

    // --- 2. Act ---
    let description = fetcher_for(&server)
        .describe("https://www.instagram.com/reel/Cabc123/")
        .await;

    // --- 3. Assert ---
    assert_eq!(description.text, "Funny Instagram Reel or meme video");
}

#[tokio::test]
async fn test_invalid_link_never_hits_the_network() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    // --- 2. Act ---
    let description = fetcher_for(&server)
        .describe("https://www.instagram.com/reel//")
        .await;

    // --- 3. Assert ---
    assert_eq!(description.text, "Funny Instagram Reel or meme video");
    assert!(server.received_requests().await.unwrap().is_empty());
}
