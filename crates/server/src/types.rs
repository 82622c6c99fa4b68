use serde::{Deserialize, Serialize};

/// The request body for `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// The video link. A missing field is treated as an empty link.
    #[serde(default)]
    pub link: String,
}

/// The response body for `POST /generate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub comments: String,
    /// Public URL of the spoken comments, e.g. `/static/<uuid>.mp3`.
    pub audio: String,
}
