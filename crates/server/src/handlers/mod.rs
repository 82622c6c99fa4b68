//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for `quipster-server`.

pub mod general;
pub mod generate;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use general::*;
pub use generate::*;

use super::{errors::AppError, state::AppState};
