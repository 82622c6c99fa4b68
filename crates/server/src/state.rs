//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. Every collaborator a request needs (the link
//! classifier, the comment generator, the speech provider and the clip store)
//! is created once here and shared behind `Arc`s.

use crate::{config::AppConfig, router::AUDIO_ROUTE};
use quipster::{
    prompts::comments::{COMMENT_GENERATION_SYSTEM_PROMPT, COMMENT_GENERATION_USER_PROMPT},
    providers::{ai::gemini::GeminiProvider, speech::google::GoogleTranslateSpeech},
    AudioStore, CommentGenerator, LinkClassifier, SpeechProvider,
};
use quipster_instagram::InstagramFetcher;
use quipster_youtube::YouTubeFetcher;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<LinkClassifier>,
    pub comment_generator: Arc<CommentGenerator>,
    pub speech_provider: Arc<dyn SpeechProvider>,
    pub audio_store: AudioStore,
    /// Language the comments are spoken in (e.g., "hi").
    pub speech_language: String,
}

/// Builds the shared application state from the configuration.
///
/// Also creates the audio directory if it does not exist yet.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = match &config.gemini_api_url {
        Some(api_url) => GeminiProvider::new(api_url.clone(), config.gemini_api_key.clone())?,
        None => GeminiProvider::for_model(&config.gemini_model, config.gemini_api_key.clone())?,
    };
    info!(model = %config.gemini_model, "Initialized Gemini provider.");

    let comment_generator = CommentGenerator::new(Box::new(ai_provider)).with_prompts(
        config
            .prompts
            .comment_system_prompt
            .clone()
            .unwrap_or_else(|| COMMENT_GENERATION_SYSTEM_PROMPT.to_string()),
        config
            .prompts
            .comment_user_prompt
            .clone()
            .unwrap_or_else(|| COMMENT_GENERATION_USER_PROMPT.to_string()),
    );

    let youtube = YouTubeFetcher::new()?.with_base_url(&config.youtube_base_url);
    let instagram = InstagramFetcher::new()?.with_base_url(&config.instagram_base_url);
    let classifier = LinkClassifier::new(Arc::new(youtube), Arc::new(instagram));

    let speech_provider = GoogleTranslateSpeech::new(&config.speech_base_url)?;

    let audio_store =
        AudioStore::new(&config.audio_dir, AUDIO_ROUTE).with_max_clips(config.max_audio_clips);
    audio_store.ensure_dir().await?;
    info!(
        dir = %config.audio_dir,
        max_clips = config.max_audio_clips,
        "Audio clips will be stored on disk."
    );

    Ok(AppState {
        classifier: Arc::new(classifier),
        comment_generator: Arc::new(comment_generator),
        speech_provider: Arc::new(speech_provider),
        audio_store,
        speech_language: config.speech_language,
    })
}
