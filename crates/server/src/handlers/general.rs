//! # General Route Handlers
//!
//! The index page and the health check.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// The handler for the root (`/`) endpoint. Serves the single-page UI.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
