//! Status polling shared by the video and image endpoints.

use adforge_core::generation::resolve_prediction_id;
use adforge_core::status::{JobStatus, NormalizedStatus};
use adforge_vendors::PredictionVendor;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::StatusError;
use crate::handlers::json_body;

/// Poll request body. Either field may carry the job id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub prediction_id: Option<String>,
}

/// Normalized job status returned to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: String,
    pub status: NormalizedStatus,
    pub vendor_status: String,
    /// Output URL; `null` until the job succeeds.
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl From<JobStatus> for PollResponse {
    fn from(job: JobStatus) -> Self {
        Self {
            id: job.id,
            status: job.status,
            vendor_status: job.vendor_status,
            output: job.output,
            error: job.error,
            progress: job.progress,
        }
    }
}

/// Check credentials, resolve the job id from the body and poll `vendor`.
pub async fn poll_job<V>(
    vendor: &V,
    body: Result<Json<PollRequest>, JsonRejection>,
) -> Result<Json<PollResponse>, StatusError>
where
    V: PredictionVendor + ?Sized,
{
    vendor.check_credentials()?;

    let req = json_body(body)?;
    let id = resolve_prediction_id(req.id.as_deref(), req.prediction_id.as_deref())?;

    let job = vendor.poll(&id).await?;

    tracing::debug!(
        vendor = %vendor.vendor(),
        prediction_id = %job.id,
        vendor_status = %job.vendor_status,
        status = job.status.as_str(),
        "Polled job status",
    );

    Ok(Json(job.into()))
}
