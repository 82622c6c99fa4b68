use super::{handlers, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// The route stored audio clips are served under.
pub const AUDIO_ROUTE: &str = "/static";

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let clips = ServeDir::new(app_state.audio_store.dir());

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/generate", post(handlers::generate_handler))
        .nest_service(AUDIO_ROUTE, clips)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
