//! # Caption Transcripts
//!
//! Fetches the English caption track of a video the same way the web player
//! does: the watch page yields the innertube API key, the `player` endpoint
//! lists caption tracks, and the chosen track's timed-text XML holds the cues.

use quipster::FetchError;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::json;
use std::sync::LazyLock;
use tracing::debug;

const TRANSCRIPT_LANGUAGE: &str = "en";
const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

static INNERTUBE_API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
        .expect("INNERTUBE_API_KEY pattern is valid")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for auto-generated tracks.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Returns the English transcript of `video_id` as a single line of text.
pub async fn fetch_transcript(
    client: &Client,
    base_url: &str,
    video_id: &str,
) -> Result<String, FetchError> {
    let api_key = fetch_innertube_api_key(client, base_url, video_id).await?;
    let tracks = fetch_caption_tracks(client, base_url, &api_key, video_id).await?;
    let track = select_track(&tracks, TRANSCRIPT_LANGUAGE).ok_or_else(|| {
        FetchError::Decode(format!("no '{TRANSCRIPT_LANGUAGE}' captions for {video_id}"))
    })?;
    debug!(%video_id, generated = track.is_generated(), "Selected caption track");

    let track_url = if track.base_url.starts_with('/') {
        format!("{base_url}{}", track.base_url)
    } else {
        track.base_url.clone()
    };
    let xml = client
        .get(track_url.replace("&fmt=srv3", ""))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_timed_text(&xml)
}

async fn fetch_innertube_api_key(
    client: &Client,
    base_url: &str,
    video_id: &str,
) -> Result<String, FetchError> {
    let html = client
        .get(format!("{base_url}/watch"))
        .query(&[("v", video_id)])
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    INNERTUBE_API_KEY_RE
        .captures(&html)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| FetchError::Decode("INNERTUBE_API_KEY not found in watch page".into()))
}

async fn fetch_caption_tracks(
    client: &Client,
    base_url: &str,
    api_key: &str,
    video_id: &str,
) -> Result<Vec<CaptionTrack>, FetchError> {
    let body = json!({
        "context": {
            "client": {
                "clientName": INNERTUBE_CLIENT_NAME,
                "clientVersion": INNERTUBE_CLIENT_VERSION
            }
        },
        "videoId": video_id
    });

    let player: PlayerResponse = client
        .post(format!("{base_url}/youtubei/v1/player"))
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(player
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .map(|r| r.caption_tracks)
        .unwrap_or_default())
}

/// Picks a manually created track in `language`, falling back to a generated one.
pub fn select_track<'a>(tracks: &'a [CaptionTrack], language: &str) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|t| t.language_code == language && !t.is_generated())
        .or_else(|| tracks.iter().find(|t| t.language_code == language))
}

/// Joins the cue texts of a timed-text document with single spaces.
///
/// Cue text is escaped twice (XML, then HTML), so it is decoded twice and any
/// markup left inside a cue is dropped.
pub fn parse_timed_text(xml: &str) -> Result<String, FetchError> {
    let selector = Selector::parse("text").map_err(|e| FetchError::Unexpected(e.to_string()))?;
    let document = Html::parse_document(xml);

    let cues: Vec<String> = document
        .select(&selector)
        .map(|cue| decode_html(&cue.text().collect::<String>()))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
        .collect();

    Ok(cues.join(" "))
}

fn decode_html(text: &str) -> String {
    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect::<String>()
}
