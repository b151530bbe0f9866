//! Route definitions for image-to-video endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Routes mounted at `/video`.
///
/// ```text
/// POST /{vendor}/generate    -> submit_video
/// POST /{vendor}/status      -> poll_video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{vendor}/generate", post(video::submit_video))
        .route("/{vendor}/status", post(video::poll_video))
}
