//! # Comment Generation Handler
//!
//! `POST /generate` runs the whole pipeline for one link: describe the video,
//! generate comments, speak them and store the clip.

use super::{AppError, AppState};
use crate::types::{GenerateRequest, GenerateResponse};
use axum::{extract::State, Json};
use quipster::voice::save_voice;
use tracing::info;

pub async fn generate_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let link = payload.link.trim();
    info!("Received generate request for link: '{link}'");

    let description = app_state.classifier.describe(link).await;
    if description.is_fallback() {
        info!(outcome = ?description.outcome, "Using placeholder description");
    }

    let comments = app_state
        .comment_generator
        .generate(&description.text)
        .await?;

    let clip = save_voice(
        app_state.speech_provider.as_ref(),
        &app_state.audio_store,
        &comments,
        &app_state.speech_language,
    )
    .await?;

    Ok(Json(GenerateResponse {
        comments,
        audio: clip.public_url,
    }))
}
