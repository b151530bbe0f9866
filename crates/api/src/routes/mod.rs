pub mod health;
pub mod images;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /video/{vendor}/generate     submit image-to-video job (POST)
/// /video/{vendor}/status       poll video job status (POST)
///
/// /images/generate             submit text-to-image job (POST)
/// /images/status               poll image job status (POST)
/// ```
///
/// `{vendor}` is `runway` or `replicate`. CORS preflight (`OPTIONS`) on
/// any path is answered by the CORS layer in [`crate::router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/video", video::router())
        .nest("/images", images::router())
}
