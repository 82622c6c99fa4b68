use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quipster::{PromptError, SpeechError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// Wraps the failures a request can run into so they can be turned into
/// JSON error responses. Description lookups never fail, so they have no
/// variant here.
pub enum AppError {
    /// Comment generation failed.
    Prompt(PromptError),
    /// Speech synthesis or clip storage failed.
    Speech(SpeechError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<SpeechError> for AppError {
    fn from(err: SpeechError) -> Self {
        AppError::Speech(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Prompt(err) => {
                error!("PromptError: {:?}", err);
                match err {
                    PromptError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                    PromptError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    PromptError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    PromptError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    PromptError::EmptyResponse => (
                        StatusCode::BAD_GATEWAY,
                        "AI provider returned no comments.".to_string(),
                    ),
                }
            }
            AppError::Speech(err) => {
                error!("SpeechError: {:?}", err);
                match err {
                    SpeechError::Io(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to store audio clip: {e}"),
                    ),
                    SpeechError::EmptyText => (
                        StatusCode::BAD_GATEWAY,
                        "AI provider returned no speakable text.".to_string(),
                    ),
                    other => (
                        StatusCode::BAD_GATEWAY,
                        format!("Speech synthesis failed: {other}"),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
