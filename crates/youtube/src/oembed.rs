//! Title and uploader lookup through YouTube's oEmbed endpoint.

use quipster::FetchError;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: String,
}

/// The canonical watch URL oEmbed is queried with.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

pub async fn fetch_metadata(
    client: &Client,
    base_url: &str,
    video_id: &str,
) -> Result<VideoMetadata, FetchError> {
    let response = client
        .get(format!("{base_url}/oembed"))
        .query(&[("url", watch_url(video_id).as_str()), ("format", "json")])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(FetchError::MetadataStatus(response.status().as_u16()));
    }

    response
        .json::<VideoMetadata>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}
