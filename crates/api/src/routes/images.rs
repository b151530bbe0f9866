//! Route definitions for the image studio.

use axum::routing::post;
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST /generate    -> submit_image
/// POST /status      -> poll_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(images::submit_image))
        .route("/status", post(images::poll_image))
}
