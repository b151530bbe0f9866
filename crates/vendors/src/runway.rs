//! Runway image-to-video client.
//!
//! Wraps `POST /v1/image_to_video` (task creation) and `GET /v1/tasks/{id}`
//! (task status). Every request carries the bearer token and the pinned
//! `X-Runway-Version` header.

use adforge_core::generation::{
    VideoJobRequest, RUNWAY_API_VERSION, RUNWAY_DURATION_SECS, RUNWAY_MODEL, RUNWAY_RATIO,
};
use adforge_core::status::{initial_vendor_status, normalize, JobStatus, Submission};
use adforge_core::vendor::Vendor;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VendorError;
use crate::http::{endpoint_url, parse_response, require_credential, trim_base_url};
use crate::provider::{PredictionVendor, VideoVendor};

/// Production API host.
pub const DEFAULT_RUNWAY_API_URL: &str = "https://api.dev.runwayml.com";

const VERSION_HEADER: &str = "X-Runway-Version";

/// Connection settings for Runway.
#[derive(Debug, Clone)]
pub struct RunwayConfig {
    /// Bearer token (`RUNWAY_API_KEY`). `None` leaves the client unconfigured.
    pub api_key: Option<String>,
    /// Base HTTP URL, e.g. `https://api.dev.runwayml.com`.
    pub api_url: String,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_RUNWAY_API_URL.to_string(),
        }
    }
}

/// HTTP client for the Runway API.
pub struct RunwayClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageToVideoBody<'a> {
    model: &'a str,
    prompt_image: &'a str,
    prompt_text: &'a str,
    duration: u32,
    ratio: &'a str,
}

/// Response to task creation. Runway answers with the id only; `status`
/// is read when present.
#[derive(Debug, Deserialize)]
struct CreateTaskResponse {
    id: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResponse {
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Vec<String>>,
    #[serde(default)]
    failure: Option<String>,
    #[serde(default)]
    failure_code: Option<String>,
    #[serde(default)]
    progress: Option<f64>,
}

impl RunwayClient {
    pub fn new(config: RunwayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shared
    /// connection pool).
    pub fn with_client(client: reqwest::Client, config: RunwayConfig) -> Self {
        Self {
            client,
            api_url: trim_base_url(&config.api_url),
            api_key: config.api_key,
        }
    }

    fn token(&self) -> Result<&str, VendorError> {
        require_credential(Vendor::Runway, self.api_key.as_deref())
    }
}

#[async_trait]
impl PredictionVendor for RunwayClient {
    fn vendor(&self) -> Vendor {
        Vendor::Runway
    }

    fn is_configured(&self) -> bool {
        self.token().is_ok()
    }

    async fn poll(&self, id: &str) -> Result<JobStatus, VendorError> {
        let token = self.token()?;

        let response = self
            .client
            .get(endpoint_url(Vendor::Runway, &self.api_url, &["v1", "tasks", id])?)
            .bearer_auth(token)
            .header(VERSION_HEADER, RUNWAY_API_VERSION)
            .send()
            .await?;

        let task: TaskResponse = parse_response(Vendor::Runway, response).await?;
        Ok(task_status(task))
    }
}

#[async_trait]
impl VideoVendor for RunwayClient {
    async fn submit_video(&self, job: &VideoJobRequest) -> Result<Submission, VendorError> {
        let token = self.token()?;

        let body = ImageToVideoBody {
            model: RUNWAY_MODEL,
            prompt_image: &job.image,
            prompt_text: &job.prompt,
            duration: RUNWAY_DURATION_SECS,
            ratio: RUNWAY_RATIO,
        };

        let response = self
            .client
            .post(endpoint_url(
                Vendor::Runway,
                &self.api_url,
                &["v1", "image_to_video"],
            )?)
            .bearer_auth(token)
            .header(VERSION_HEADER, RUNWAY_API_VERSION)
            .json(&body)
            .send()
            .await?;

        let created: CreateTaskResponse = parse_response(Vendor::Runway, response).await?;
        let vendor_status = created
            .status
            .unwrap_or_else(|| initial_vendor_status(Vendor::Runway).to_string());

        tracing::info!(
            vendor = %Vendor::Runway,
            prediction_id = %created.id,
            vendor_status = %vendor_status,
            "Runway task created",
        );

        Ok(Submission {
            id: created.id,
            vendor_status,
        })
    }
}

/// Convert a Runway task into the normalized status view.
fn task_status(task: TaskResponse) -> JobStatus {
    if !normalize(Vendor::Runway, &task.status).recognized {
        tracing::warn!(
            prediction_id = %task.id,
            vendor_status = %task.status,
            "Unrecognized Runway task status, reporting as processing",
        );
    }

    let output = task.output.and_then(|urls| urls.into_iter().next());
    let error = match (task.failure, task.failure_code) {
        (Some(failure), Some(code)) => Some(format!("{failure} ({code})")),
        (Some(failure), None) => Some(failure),
        (None, Some(code)) => Some(code),
        (None, None) => None,
    };

    JobStatus::from_vendor(
        Vendor::Runway,
        task.id,
        task.status,
        output,
        error,
        task.progress,
    )
}
