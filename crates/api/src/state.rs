use std::sync::Arc;
use std::time::Duration;

use adforge_core::vendor::Vendor;
use adforge_vendors::{ImageVendor, ReplicateClient, RunwayClient, VideoVendor};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Vendor clients
/// are held as trait objects so tests can inject fakes.
#[derive(Clone)]
pub struct AppState {
    /// Runway image-to-video client.
    pub runway: Arc<dyn VideoVendor>,
    /// Replicate image-to-video client.
    pub replicate: Arc<dyn VideoVendor>,
    /// Replicate text-to-image client (image studio).
    pub images: Arc<dyn ImageVendor>,
}

impl AppState {
    /// Build the real vendor clients from configuration.
    ///
    /// All clients share one [`reqwest::Client`] connection pool.
    pub fn from_config(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = adforge_vendors::http::build_client(
            config.vendor_timeout_secs.map(Duration::from_secs),
        )?;

        let runway = Arc::new(RunwayClient::with_client(
            http.clone(),
            config.runway.clone(),
        ));
        let replicate = Arc::new(ReplicateClient::with_client(
            http,
            config.replicate.clone(),
        ));

        Ok(Self {
            runway,
            replicate: replicate.clone(),
            images: replicate,
        })
    }

    /// The image-to-video client for `vendor`.
    pub fn video_vendor(&self, vendor: Vendor) -> &Arc<dyn VideoVendor> {
        match vendor {
            Vendor::Runway => &self.runway,
            Vendor::Replicate => &self.replicate,
        }
    }
}
