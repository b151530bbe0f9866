//! Vendor traits the HTTP layer is written against.
//!
//! Handlers hold `Arc<dyn VideoVendor>` / `Arc<dyn ImageVendor>` so tests
//! can substitute in-memory fakes for the real HTTP clients.

use adforge_core::generation::VideoJobRequest;
use adforge_core::image_models::ImageJobRequest;
use adforge_core::status::{JobStatus, Submission};
use adforge_core::vendor::Vendor;
use async_trait::async_trait;

use crate::error::VendorError;

/// Operations common to every vendor: identity, credential presence and
/// status polling.
#[async_trait]
pub trait PredictionVendor: Send + Sync {
    fn vendor(&self) -> Vendor;

    /// Whether a non-blank credential was supplied at construction.
    fn is_configured(&self) -> bool;

    /// Fail fast with [`VendorError::MissingCredential`] when unconfigured.
    fn check_credentials(&self) -> Result<(), VendorError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(VendorError::missing_credential(self.vendor()))
        }
    }

    /// Query the vendor for a job and normalize its status.
    async fn poll(&self, id: &str) -> Result<JobStatus, VendorError>;
}

/// A vendor that turns a still image into a video clip.
#[async_trait]
pub trait VideoVendor: PredictionVendor {
    async fn submit_video(&self, job: &VideoJobRequest) -> Result<Submission, VendorError>;
}

/// A vendor that generates images from a text prompt.
#[async_trait]
pub trait ImageVendor: PredictionVendor {
    async fn submit_image(&self, job: &ImageJobRequest) -> Result<Submission, VendorError>;
}
