//! Handlers for image-to-video generation.

use adforge_core::generation::validate_video_job;
use adforge_core::status::Submission;
use adforge_core::vendor::Vendor;
use adforge_vendors::{PredictionVendor, VideoVendor};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppResult, StatusError};
use crate::handlers::json_body;
use crate::handlers::status::{poll_job, PollRequest, PollResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for submitting a video job.
#[derive(Debug, Deserialize)]
pub struct SubmitVideoRequest {
    /// Source image as a URL or data URI. Required.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Vendor job id and the vendor's initial status, verbatim.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub prediction_id: String,
    pub status: String,
}

impl From<Submission> for SubmitResponse {
    fn from(submission: Submission) -> Self {
        Self {
            prediction_id: submission.id,
            status: submission.vendor_status,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /video/{vendor}/generate
///
/// Start an image-to-video job with the vendor's fixed model parameters.
pub async fn submit_video(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
    body: Result<Json<SubmitVideoRequest>, JsonRejection>,
) -> AppResult<Json<SubmitResponse>> {
    let vendor: Vendor = vendor.parse()?;
    let client = state.video_vendor(vendor);
    client.check_credentials()?;

    let req = json_body(body)?;
    let job = validate_video_job(req.image.as_deref(), req.prompt.as_deref())?;

    let submission = client.submit_video(&job).await?;

    tracing::info!(
        vendor = %vendor,
        prediction_id = %submission.id,
        "Video job submitted",
    );

    Ok(Json(submission.into()))
}

/// POST /video/{vendor}/status
///
/// Report the normalized status of a video job.
pub async fn poll_video(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
    body: Result<Json<PollRequest>, JsonRejection>,
) -> Result<Json<PollResponse>, StatusError> {
    let vendor: Vendor = vendor.parse()?;
    poll_job(&**state.video_vendor(vendor), body).await
}
