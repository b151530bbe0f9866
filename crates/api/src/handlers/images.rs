//! Handlers for the image studio (text-to-image on Replicate).

use adforge_core::image_models::{validate_image_job, ImageJobInput, ImageModel};
use adforge_vendors::{ImageVendor, PredictionVendor};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppResult, StatusError};
use crate::handlers::json_body;
use crate::handlers::status::{poll_job, PollRequest, PollResponse};
use crate::handlers::video::SubmitResponse;
use crate::state::AppState;

/// Request body for submitting an image job.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitImageRequest {
    pub model: ImageModel,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub seed: Option<i64>,
}

/// POST /images/generate
pub async fn submit_image(
    State(state): State<AppState>,
    body: Result<Json<SubmitImageRequest>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    state.images.check_credentials()?;

    let req = json_body(body)?;
    let job = validate_image_job(
        req.model,
        ImageJobInput {
            prompt: req.prompt.as_deref(),
            width: req.width,
            height: req.height,
            negative_prompt: req.negative_prompt.as_deref(),
            seed: req.seed,
        },
    )?;

    let submission = state.images.submit_image(&job).await?;

    tracing::info!(
        model = %job.model,
        prediction_id = %submission.id,
        "Image job submitted",
    );

    Ok(Json(submission.into()))
}

/// POST /images/status
pub async fn poll_image(
    State(state): State<AppState>,
    body: Result<Json<PollRequest>, JsonRejection>,
) -> Result<Json<PollResponse>, StatusError> {
    poll_job(&*state.images, body).await
}
