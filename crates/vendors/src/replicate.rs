//! Replicate predictions client.
//!
//! Video jobs and SDXL images go to `POST /v1/predictions` with a pinned
//! model version; official models such as Flux Pro go to
//! `POST /v1/models/{owner}/{name}/predictions`. Status comes from
//! `GET /v1/predictions/{id}` for both.

use adforge_core::generation::{
    VideoJobRequest, REPLICATE_DEFAULT_VIDEO_VERSION, REPLICATE_VIDEO_PARAMS,
};
use adforge_core::image_models::{ImageJobRequest, ImageModel, ModelRef};
use adforge_core::status::{normalize, JobStatus, Submission};
use adforge_core::vendor::Vendor;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::VendorError;
use crate::http::{
    endpoint_url, first_output_url, parse_response, require_credential, trim_base_url,
};
use crate::provider::{ImageVendor, PredictionVendor, VideoVendor};

/// Production API host.
pub const DEFAULT_REPLICATE_API_URL: &str = "https://api.replicate.com";

/// Connection settings for Replicate.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    /// Bearer token (`REPLICATE_API_TOKEN`). `None` leaves the client
    /// unconfigured.
    pub api_token: Option<String>,
    /// Base HTTP URL, e.g. `https://api.replicate.com`.
    pub api_url: String,
    /// Model version used for image-to-video jobs.
    pub video_version: String,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_url: DEFAULT_REPLICATE_API_URL.to_string(),
            video_version: REPLICATE_DEFAULT_VIDEO_VERSION.to_string(),
        }
    }
}

/// HTTP client for the Replicate API.
pub struct ReplicateClient {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    video_version: String,
}

/// A Replicate prediction as returned by create and get.
///
/// `output` is model-specific (a URL, an array of URLs, or null) and
/// `error` may be a string or an object.
#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: String,
    #[serde(default)]
    output: Value,
    #[serde(default)]
    error: Value,
}

impl ReplicateClient {
    pub fn new(config: ReplicateConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shared
    /// connection pool).
    pub fn with_client(client: reqwest::Client, config: ReplicateConfig) -> Self {
        Self {
            client,
            api_url: trim_base_url(&config.api_url),
            api_token: config.api_token,
            video_version: config.video_version,
        }
    }

    fn token(&self) -> Result<&str, VendorError> {
        require_credential(Vendor::Replicate, self.api_token.as_deref())
    }

    /// Create a prediction at the endpoint named by `path` and return its
    /// id and initial status.
    async fn create_prediction(
        &self,
        path: &[&str],
        body: &Value,
    ) -> Result<Submission, VendorError> {
        let token = self.token()?;
        let url = endpoint_url(Vendor::Replicate, &self.api_url, path)?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let prediction: Prediction = parse_response(Vendor::Replicate, response).await?;

        tracing::info!(
            vendor = %Vendor::Replicate,
            prediction_id = %prediction.id,
            vendor_status = %prediction.status,
            "Replicate prediction created",
        );

        Ok(Submission {
            id: prediction.id,
            vendor_status: prediction.status,
        })
    }
}

#[async_trait]
impl PredictionVendor for ReplicateClient {
    fn vendor(&self) -> Vendor {
        Vendor::Replicate
    }

    fn is_configured(&self) -> bool {
        self.token().is_ok()
    }

    async fn poll(&self, id: &str) -> Result<JobStatus, VendorError> {
        let token = self.token()?;

        let response = self
            .client
            .get(endpoint_url(
                Vendor::Replicate,
                &self.api_url,
                &["v1", "predictions", id],
            )?)
            .bearer_auth(token)
            .send()
            .await?;

        let prediction: Prediction = parse_response(Vendor::Replicate, response).await?;
        Ok(prediction_status(prediction))
    }
}

#[async_trait]
impl VideoVendor for ReplicateClient {
    async fn submit_video(&self, job: &VideoJobRequest) -> Result<Submission, VendorError> {
        let body = json!({
            "version": self.video_version,
            "input": video_input(job),
        });
        self.create_prediction(&["v1", "predictions"], &body).await
    }
}

#[async_trait]
impl ImageVendor for ReplicateClient {
    async fn submit_image(&self, job: &ImageJobRequest) -> Result<Submission, VendorError> {
        let input = image_input(job);
        match job.model.model_ref() {
            ModelRef::Version(version) => {
                let body = json!({ "version": version, "input": input });
                self.create_prediction(&["v1", "predictions"], &body).await
            }
            ModelRef::Official { owner, name } => {
                let body = json!({ "input": input });
                self.create_prediction(&["v1", "models", owner, name, "predictions"], &body)
                    .await
            }
        }
    }
}

/// Fixed model inputs plus the caller's image and prompt.
fn video_input(job: &VideoJobRequest) -> Value {
    let p = REPLICATE_VIDEO_PARAMS;
    json!({
        "image": job.image,
        "prompt": job.prompt,
        "width": p.width,
        "height": p.height,
        "num_frames": p.num_frames,
        "fps": p.fps,
        "guidance_scale": p.guidance_scale,
        "num_inference_steps": p.num_inference_steps,
        "motion_bucket_id": p.motion_bucket_id,
    })
}

fn image_input(job: &ImageJobRequest) -> Value {
    let mut input = Map::new();
    input.insert("prompt".into(), json!(job.prompt));
    input.insert("width".into(), json!(job.width));
    input.insert("height".into(), json!(job.height));
    if let Some(seed) = job.seed {
        input.insert("seed".into(), json!(seed));
    }
    match (job.model, &job.negative_prompt) {
        (ImageModel::StableDiffusionXl, Some(negative)) => {
            input.insert("negative_prompt".into(), json!(negative));
        }
        (ImageModel::FluxPro, Some(_)) => {
            tracing::debug!("Flux Pro has no negative prompt input, ignoring it");
        }
        (_, None) => {}
    }
    Value::Object(input)
}

/// Convert a Replicate prediction into the normalized status view.
fn prediction_status(prediction: Prediction) -> JobStatus {
    if !normalize(Vendor::Replicate, &prediction.status).recognized {
        tracing::warn!(
            prediction_id = %prediction.id,
            vendor_status = %prediction.status,
            "Unrecognized Replicate prediction status, reporting as processing",
        );
    }

    let output = first_output_url(&prediction.output);
    let error = match prediction.error {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    };

    JobStatus::from_vendor(
        Vendor::Replicate,
        prediction.id,
        prediction.status,
        output,
        error,
        None,
    )
}
