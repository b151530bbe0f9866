//! Video job validation and the fixed model parameters sent to each vendor.
//!
//! Model parameters are static configuration, never computed from the
//! request: the only caller-controlled inputs are the source image and an
//! optional prompt.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Request defaults
// ---------------------------------------------------------------------------

/// Prompt used when the caller omits one (or sends only whitespace).
pub const DEFAULT_VIDEO_PROMPT: &str =
    "Smooth cinematic camera motion bringing the product shot to life";

// ---------------------------------------------------------------------------
// Runway image-to-video parameters
// ---------------------------------------------------------------------------

/// Runway model used for image-to-video.
pub const RUNWAY_MODEL: &str = "gen3a_turbo";
/// Clip length in seconds (Runway accepts 5 or 10).
pub const RUNWAY_DURATION_SECS: u32 = 5;
/// Output aspect ratio in Runway's `W:H` pixel notation.
pub const RUNWAY_RATIO: &str = "1280:768";
/// API version pinned via the `X-Runway-Version` header.
pub const RUNWAY_API_VERSION: &str = "2024-11-06";

// ---------------------------------------------------------------------------
// Replicate image-to-video parameters
// ---------------------------------------------------------------------------

/// Default Replicate model version for image-to-video.
pub const REPLICATE_DEFAULT_VIDEO_VERSION: &str =
    "3f0457e4619daac51203dedb472816fd4af51f3149fa7a9e0b5ffcf1b8172438";

/// Fixed inputs for the Replicate image-to-video model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoModelParams {
    pub width: u32,
    pub height: u32,
    pub num_frames: u32,
    pub fps: u32,
    pub guidance_scale: f64,
    pub num_inference_steps: u32,
    pub motion_bucket_id: u32,
}

pub const REPLICATE_VIDEO_PARAMS: VideoModelParams = VideoModelParams {
    width: 1024,
    height: 576,
    num_frames: 25,
    fps: 6,
    guidance_scale: 7.5,
    num_inference_steps: 25,
    motion_bucket_id: 127,
};

// ---------------------------------------------------------------------------
// Validated request
// ---------------------------------------------------------------------------

/// A validated image-to-video job, ready to send to a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoJobRequest {
    /// Source image as a URL or data URI.
    pub image: String,
    pub prompt: String,
}

/// Validate raw submit fields.
///
/// - `image` must be present and non-blank.
/// - A missing or blank `prompt` becomes [`DEFAULT_VIDEO_PROMPT`].
pub fn validate_video_job(
    image: Option<&str>,
    prompt: Option<&str>,
) -> Result<VideoJobRequest, CoreError> {
    let image = image
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("image is required".to_string()))?;

    let prompt = prompt
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_VIDEO_PROMPT);

    Ok(VideoJobRequest {
        image: image.to_string(),
        prompt: prompt.to_string(),
    })
}

/// Validate a poll identifier pair, preferring `id` over `predictionId`.
///
/// Blank values count as absent. Vendor job ids are alphanumeric with `-`
/// or `_`; anything else is rejected so the id can only ever name a single
/// path segment on the vendor side.
pub fn resolve_prediction_id(
    id: Option<&str>,
    prediction_id: Option<&str>,
) -> Result<String, CoreError> {
    let id = [id, prediction_id]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("id or predictionId is required".to_string()))?;

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "Invalid prediction id '{id}': only letters, digits, '-' and '_' are allowed"
        )));
    }

    Ok(id.to_string())
}
