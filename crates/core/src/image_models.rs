//! Text-to-image models offered by the image studio.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default edge length when the caller omits width or height.
pub const DEFAULT_IMAGE_EDGE: u32 = 1024;

/// Image models hosted on Replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "sdxl")]
    StableDiffusionXl,
    #[serde(rename = "flux-pro")]
    FluxPro,
}

/// How a model is addressed on Replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRef {
    /// A pinned version id, submitted to `/v1/predictions`.
    Version(&'static str),
    /// An official model, submitted to `/v1/models/{owner}/{name}/predictions`.
    Official {
        owner: &'static str,
        name: &'static str,
    },
}

/// Accepted dimension range and alignment for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionRule {
    pub min: u32,
    pub max: u32,
    pub multiple_of: u32,
}

impl ImageModel {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageModel::StableDiffusionXl => "sdxl",
            ImageModel::FluxPro => "flux-pro",
        }
    }

    pub fn model_ref(self) -> ModelRef {
        match self {
            ImageModel::StableDiffusionXl => ModelRef::Version(
                "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b",
            ),
            ImageModel::FluxPro => ModelRef::Official {
                owner: "black-forest-labs",
                name: "flux-pro",
            },
        }
    }

    pub fn dimension_rule(self) -> DimensionRule {
        match self {
            ImageModel::StableDiffusionXl => DimensionRule {
                min: 256,
                max: 1536,
                multiple_of: 8,
            },
            ImageModel::FluxPro => DimensionRule {
                min: 256,
                max: 1440,
                multiple_of: 32,
            },
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated text-to-image job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJobRequest {
    pub model: ImageModel,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub negative_prompt: Option<String>,
    pub seed: Option<i64>,
}

/// Raw, unvalidated image job fields as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct ImageJobInput<'a> {
    pub prompt: Option<&'a str>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub negative_prompt: Option<&'a str>,
    pub seed: Option<i64>,
}

pub fn validate_image_job(
    model: ImageModel,
    input: ImageJobInput<'_>,
) -> Result<ImageJobRequest, CoreError> {
    let prompt = input
        .prompt
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CoreError::Validation("prompt is required".to_string()))?;

    let rule = model.dimension_rule();
    let width = input.width.unwrap_or(DEFAULT_IMAGE_EDGE);
    let height = input.height.unwrap_or(DEFAULT_IMAGE_EDGE);
    validate_dimension(model, "width", width, rule)?;
    validate_dimension(model, "height", height, rule)?;

    let negative_prompt = input
        .negative_prompt
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Ok(ImageJobRequest {
        model,
        prompt: prompt.to_string(),
        width,
        height,
        negative_prompt,
        seed: input.seed,
    })
}

fn validate_dimension(
    model: ImageModel,
    field: &str,
    value: u32,
    rule: DimensionRule,
) -> Result<(), CoreError> {
    if value < rule.min || value > rule.max || value % rule.multiple_of != 0 {
        return Err(CoreError::Validation(format!(
            "{field} must be between {} and {} and a multiple of {} for {model}, got {value}",
            rule.min, rule.max, rule.multiple_of
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn input(prompt: &str) -> ImageJobInput<'_> {
        ImageJobInput {
            prompt: Some(prompt),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_square_1024() {
        let job = validate_image_job(ImageModel::FluxPro, input("a red sneaker")).unwrap();
        assert_eq!((job.width, job.height), (1024, 1024));
        assert_eq!(job.negative_prompt, None);
    }

    #[test]
    fn prompt_required() {
        assert_matches!(
            validate_image_job(ImageModel::StableDiffusionXl, ImageJobInput::default()),
            Err(CoreError::Validation(msg)) if msg == "prompt is required"
        );
    }

    #[test]
    fn sdxl_accepts_multiples_of_eight() {
        let job = validate_image_job(
            ImageModel::StableDiffusionXl,
            ImageJobInput {
                width: Some(1536),
                height: Some(648),
                ..input("poster")
            },
        )
        .unwrap();
        assert_eq!(job.height, 648);
    }

    #[test]
    fn flux_rejects_misaligned_height() {
        // 648 is a multiple of 8 but not of 32.
        assert_matches!(
            validate_image_job(
                ImageModel::FluxPro,
                ImageJobInput {
                    height: Some(648),
                    ..input("poster")
                },
            ),
            Err(CoreError::Validation(msg)) if msg.contains("height") && msg.contains("flux-pro")
        );
    }

    #[test]
    fn flux_rejects_oversized_width() {
        assert_matches!(
            validate_image_job(
                ImageModel::FluxPro,
                ImageJobInput {
                    width: Some(1536),
                    ..input("poster")
                },
            ),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_negative_prompt_dropped() {
        let job = validate_image_job(
            ImageModel::StableDiffusionXl,
            ImageJobInput {
                negative_prompt: Some("  "),
                seed: Some(7),
                ..input("poster")
            },
        )
        .unwrap();
        assert_eq!(job.negative_prompt, None);
        assert_eq!(job.seed, Some(7));
    }

    #[test]
    fn model_names_round_trip_through_serde() {
        let m: ImageModel = serde_json::from_str("\"flux-pro\"").unwrap();
        assert_eq!(m, ImageModel::FluxPro);
        assert_eq!(
            serde_json::to_string(&ImageModel::StableDiffusionXl).unwrap(),
            "\"sdxl\""
        );
    }
}
