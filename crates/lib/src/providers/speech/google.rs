//! # Google Translate Speech
//!
//! Talks to the same unauthenticated `batchexecute` RPC the Translate web UI
//! uses for its "listen" button. Requests are limited to short pieces of
//! text, so longer input is split and the returned MP3 frames are
//! concatenated in order.

use crate::{errors::SpeechError, providers::speech::SpeechProvider};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{
    header::{CONTENT_TYPE, REFERER, USER_AGENT},
    Client as ReqwestClient,
};
use serde_json::json;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

pub const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translate.google.com";

/// Longest piece of text a single RPC call accepts.
pub const MAX_CHUNK_CHARS: usize = 100;

const TTS_RPC_ID: &str = "jQ1olc";
const BATCHEXECUTE_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Clone, Debug)]
pub struct GoogleTranslateSpeech {
    client: ReqwestClient,
    base_url: String,
}

impl GoogleTranslateSpeech {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SpeechError> {
        let client = ReqwestClient::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn synthesize_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(format!("{}{BATCHEXECUTE_PATH}", self.base_url))
            .header(REFERER, "http://translate.google.com/")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(
                CONTENT_TYPE,
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .body(package_rpc(chunk, lang))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api { status, body });
        }

        let body = response.text().await?;
        let encoded = extract_audio_payload(&body).ok_or(SpeechError::NoAudio)?;
        Ok(STANDARD.decode(encoded)?)
    }
}

#[async_trait]
impl SpeechProvider for GoogleTranslateSpeech {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!(chunks = chunks.len(), lang, "Synthesizing speech");
        let mut audio = Vec::new();
        for chunk in &chunks {
            audio.extend(self.synthesize_chunk(chunk, lang).await?);
        }
        Ok(audio)
    }
}

/// Builds the url-encoded `f.req` form body for one chunk.
///
/// The inner parameter list is itself JSON-encoded into a string, as the
/// endpoint expects. A `null` speed selects normal speed.
fn package_rpc(text: &str, lang: &str) -> String {
    let parameter = json!([text, lang, null, "null"]).to_string();
    let rpc = json!([[[TTS_RPC_ID, parameter, null, "generic"]]]).to_string();
    let encoded: String = byte_serialize(rpc.as_bytes()).collect();
    format!("f.req={encoded}&")
}

/// Finds the base64 audio inside a `batchexecute` response.
fn extract_audio_payload(body: &str) -> Option<&str> {
    const START: &str = r#"jQ1olc","[\""#;
    const END: &str = r#"\"]"#;

    body.lines().find_map(|line| {
        let start = line.find(START)? + START.len();
        let rest = &line[start..];
        let end = rest.rfind(END)?;
        Some(&rest[..end]).filter(|payload| !payload.is_empty())
    })
}

/// Splits text into pieces of at most `max_chars` characters.
///
/// Lines and sentence endings always start a new piece, words are never
/// split unless a single word is longer than `max_chars`, and pieces with
/// nothing speakable (only punctuation or emoji) are dropped.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        for word in line.split_whitespace() {
            for part in split_long_word(word, max_chars) {
                let current_len = current.chars().count();
                let part_len = part.chars().count();
                if current_len > 0 && current_len + 1 + part_len > max_chars {
                    chunks.push(std::mem::take(&mut current));
                }
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&part);

                if ends_sentence(&part) {
                    chunks.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
    }

    chunks.retain(|chunk| chunk.chars().any(char::is_alphanumeric));
    chunks
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_chars.max(1))
        .map(|piece| piece.iter().collect())
        .collect()
}

fn ends_sentence(word: &str) -> bool {
    word.ends_with(['.', '!', '?', '।', ';'])
}
