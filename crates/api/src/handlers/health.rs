use adforge_vendors::PredictionVendor;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether each vendor's credential is configured.
    pub vendors: VendorHealth,
}

#[derive(Serialize)]
pub struct VendorHealth {
    pub runway: bool,
    pub replicate: bool,
}

/// GET /health -- returns service status and vendor credential presence.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        vendors: VendorHealth {
            runway: state.runway.is_configured(),
            replicate: state.replicate.is_configured(),
        },
    })
}
