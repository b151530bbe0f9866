//! HTTP clients for the generative-AI vendors.
//!
//! Each client wraps one vendor's REST API with [`reqwest`] and implements
//! the traits in [`provider`], which is all the HTTP layer depends on.

pub mod error;
pub mod http;
pub mod provider;
pub mod replicate;
pub mod runway;

pub use error::VendorError;
pub use provider::{ImageVendor, PredictionVendor, VideoVendor};
pub use replicate::{ReplicateClient, ReplicateConfig};
pub use runway::{RunwayClient, RunwayConfig};
