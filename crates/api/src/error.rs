use adforge_core::error::CoreError;
use adforge_core::status::NormalizedStatus;
use adforge_vendors::VendorError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`VendorError`] for upstream
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `adforge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure calling (or configuring) a vendor.
    #[error(transparent)]
    Vendor(#[from] VendorError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// An [`AppError`] reduced to what goes on the wire.
#[derive(Debug)]
pub struct ErrorBody {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    /// Vendor payload, embedded verbatim for diagnosis.
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Classify into HTTP status, error code, message and details.
    ///
    /// Vendor payloads are passed through; internal errors are sanitized.
    pub fn to_body(&self) -> ErrorBody {
        let (status, code, message, details) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
                }
                CoreError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Configuration error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_ERROR",
                        msg.clone(),
                        None,
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                        None,
                    )
                }
            },

            // --- Vendor errors ---
            AppError::Vendor(err) => classify_vendor_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
        };

        ErrorBody {
            status,
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let ErrorBody {
            status,
            code,
            message,
            details,
        } = self.to_body();

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a vendor error into an HTTP status, error code, message and
/// optional vendor payload.
///
/// Every vendor-side failure is a 500 for our caller; the code tells
/// configuration, upstream rejection and transport failures apart.
fn classify_vendor_error(
    err: &VendorError,
) -> (StatusCode, &'static str, String, Option<serde_json::Value>) {
    match err {
        VendorError::MissingCredential { .. } => {
            tracing::error!(error = %err, "Vendor credential missing");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                err.to_string(),
                None,
            )
        }
        VendorError::InvalidUrl { .. } => {
            tracing::error!(error = %err, "Vendor API URL misconfigured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                err.to_string(),
                None,
            )
        }
        VendorError::Api { status, body, .. } => {
            tracing::warn!(error = %err, vendor_status_code = status, "Vendor rejected request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "VENDOR_ERROR",
                err.to_string(),
                Some(body.clone()),
            )
        }
        VendorError::Decode { .. } => {
            tracing::error!(error = %err, "Vendor response could not be decoded");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "VENDOR_ERROR",
                err.to_string(),
                None,
            )
        }
        VendorError::Request(e) => {
            tracing::error!(error = %e, "Vendor request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "VENDOR_UNAVAILABLE",
                err.to_string(),
                None,
            )
        }
    }
}

/// An [`AppError`] rendered in the status-poll shape
/// `{ "status": "error", "message": ..., "code": ... }`.
///
/// Poll callers branch on `status`, so failures keep that field too.
#[derive(Debug)]
pub struct StatusError(pub AppError);

impl From<AppError> for StatusError {
    fn from(err: AppError) -> Self {
        StatusError(err)
    }
}

impl From<CoreError> for StatusError {
    fn from(err: CoreError) -> Self {
        StatusError(err.into())
    }
}

impl From<VendorError> for StatusError {
    fn from(err: VendorError) -> Self {
        StatusError(err.into())
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let ErrorBody {
            status,
            code,
            message,
            details,
        } = self.0.to_body();

        let mut body = json!({
            "status": NormalizedStatus::Error,
            "message": message,
            "code": code,
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, axum::Json(body)).into_response()
    }
}
