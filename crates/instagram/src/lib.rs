//! # quipster-instagram: Instagram Info Fetcher
//!
//! Implements `VideoInfoFetcher` for Instagram posts and reels by reading the
//! post caption from Instagram's public web GraphQL endpoint. Posts that need
//! a login (private accounts, removed media) come back without a media node
//! and are reported as unavailable.

use async_trait::async_trait;
use quipster::{FallbackReason, FetchError, VideoInfoFetcher};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

pub const DEFAULT_INSTAGRAM_BASE_URL: &str = "https://www.instagram.com";

/// Persisted query id of the web app's post-detail query.
const SHORTCODE_QUERY_DOC_ID: &str = "8845758582119845";
/// App id the Instagram web client sends; anonymous queries are rejected without it.
const WEB_APP_ID: &str = "936619743392459";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const MISSING_CAPTION: &str = "Funny Instagram video";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<MediaData>,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    xdt_shortcode_media: Option<Media>,
}

#[derive(Debug, Deserialize)]
struct Media {
    edge_media_to_caption: Option<CaptionEdges>,
}

#[derive(Debug, Deserialize)]
struct CaptionEdges {
    #[serde(default)]
    edges: Vec<CaptionEdge>,
}

#[derive(Debug, Deserialize)]
struct CaptionEdge {
    node: CaptionNode,
}

#[derive(Debug, Deserialize)]
struct CaptionNode {
    #[serde(default)]
    text: String,
}

#[derive(Clone, Debug)]
pub struct InstagramFetcher {
    client: Client,
    base_url: String,
}

impl InstagramFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: Client::builder().user_agent(BROWSER_USER_AGENT).build()?,
            base_url: DEFAULT_INSTAGRAM_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Looks up the caption of the post identified by `shortcode`.
    ///
    /// Returns `Ok(None)` when the post exists but has no caption.
    pub async fn fetch_caption(&self, shortcode: &str) -> Result<Option<String>, FetchError> {
        let variables = json!({
            "shortcode": shortcode,
            "fetch_tagged_user_count": null,
            "hoisted_comment_id": null,
            "hoisted_reply_id": null
        });
        let form = [
            ("variables", variables.to_string()),
            ("doc_id", SHORTCODE_QUERY_DOC_ID.to_string()),
            ("server_timestamps", "true".to_string()),
        ];

        let response: GraphQlResponse = self
            .client
            .post(format!("{}/graphql/query", self.base_url))
            .header("X-IG-App-ID", WEB_APP_ID)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        let media = response
            .data
            .and_then(|d| d.xdt_shortcode_media)
            .ok_or_else(|| FetchError::PostUnavailable(shortcode.to_string()))?;

        Ok(media
            .edge_media_to_caption
            .and_then(|c| c.edges.into_iter().next())
            .map(|edge| edge.node.text)
            .filter(|text| !text.trim().is_empty()))
    }
}

#[async_trait]
impl VideoInfoFetcher for InstagramFetcher {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn source_fallback(&self) -> FallbackReason {
        FallbackReason::PostUnavailable
    }

    async fn fetch(&self, link: &str) -> Result<String, FetchError> {
        let shortcode = extract_shortcode(link)?;
        info!(%shortcode, "Fetching Instagram post caption");

        let caption = self.fetch_caption(&shortcode).await?.unwrap_or_else(|| {
            debug!(%shortcode, "Post has no caption");
            MISSING_CAPTION.to_string()
        });
        Ok(format!("Instagram Reel Caption: {caption}"))
    }
}

/// Takes the second-to-last `/`-separated segment of a post link, so
/// `https://www.instagram.com/reel/Cabc123/` yields `Cabc123`.
pub fn extract_shortcode(url: &str) -> Result<String, FetchError> {
    let segments: Vec<&str> = url.split('/').collect();
    let shortcode = segments
        .len()
        .checked_sub(2)
        .map(|i| segments[i])
        .unwrap_or_default();

    let valid = !shortcode.is_empty()
        && shortcode
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(shortcode.to_string())
    } else {
        Err(FetchError::InvalidPostUrl(url.to_string()))
    }
}
