//! Normalized job status and vendor status vocabularies.
//!
//! Every vendor reports progress with its own strings. Callers of this
//! service only ever see [`NormalizedStatus`], which is derived from the
//! vendor string alone via [`normalize`]. Output URLs and error details are
//! carried next to it but never influence it.

use serde::{Deserialize, Serialize};

use crate::types::PredictionId;
use crate::vendor::Vendor;

// ---------------------------------------------------------------------------
// Normalized status
// ---------------------------------------------------------------------------

/// The fixed status vocabulary exposed to our own callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedStatus {
    /// The vendor is still working (queued, throttled, running, ...).
    Processing,
    /// The vendor finished the job.
    Succeeded,
    /// The vendor gave up on the job (failed or cancelled).
    Failed,
    /// We could not determine the status (transport, credential or vendor
    /// error). Never produced by [`normalize`].
    Error,
}

impl NormalizedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NormalizedStatus::Processing => "processing",
            NormalizedStatus::Succeeded => "succeeded",
            NormalizedStatus::Failed => "failed",
            NormalizedStatus::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Runway task statuses
// ---------------------------------------------------------------------------

pub const RUNWAY_PENDING: &str = "PENDING";
pub const RUNWAY_THROTTLED: &str = "THROTTLED";
pub const RUNWAY_RUNNING: &str = "RUNNING";
pub const RUNWAY_SUCCEEDED: &str = "SUCCEEDED";
pub const RUNWAY_FAILED: &str = "FAILED";
pub const RUNWAY_CANCELLED: &str = "CANCELLED";

// ---------------------------------------------------------------------------
// Replicate prediction statuses
// ---------------------------------------------------------------------------

pub const REPLICATE_STARTING: &str = "starting";
pub const REPLICATE_PROCESSING: &str = "processing";
pub const REPLICATE_SUCCEEDED: &str = "succeeded";
pub const REPLICATE_FAILED: &str = "failed";
pub const REPLICATE_CANCELED: &str = "canceled";

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Outcome of mapping a vendor status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub status: NormalizedStatus,
    /// `false` when the vendor string is outside the known vocabulary and
    /// the fallback (processing) was applied.
    pub recognized: bool,
}

/// Map a vendor status string onto [`NormalizedStatus`].
///
/// Every status in the vendor's documented vocabulary is listed
/// explicitly. Anything else falls back to `Processing` with
/// `recognized = false` so the caller can log it.
pub fn normalize(vendor: Vendor, vendor_status: &str) -> Normalized {
    let status = match vendor {
        Vendor::Runway => match vendor_status {
            RUNWAY_PENDING | RUNWAY_THROTTLED | RUNWAY_RUNNING => {
                Some(NormalizedStatus::Processing)
            }
            RUNWAY_SUCCEEDED => Some(NormalizedStatus::Succeeded),
            RUNWAY_FAILED | RUNWAY_CANCELLED => Some(NormalizedStatus::Failed),
            _ => None,
        },
        Vendor::Replicate => match vendor_status {
            REPLICATE_STARTING | REPLICATE_PROCESSING => Some(NormalizedStatus::Processing),
            REPLICATE_SUCCEEDED => Some(NormalizedStatus::Succeeded),
            REPLICATE_FAILED | REPLICATE_CANCELED => Some(NormalizedStatus::Failed),
            _ => None,
        },
    };

    match status {
        Some(status) => Normalized {
            status,
            recognized: true,
        },
        None => Normalized {
            status: NormalizedStatus::Processing,
            recognized: false,
        },
    }
}

/// Status implied by a create response that carries only an id (Runway's
/// `image_to_video` answers `{ "id": ... }`).
pub fn initial_vendor_status(vendor: Vendor) -> &'static str {
    match vendor {
        Vendor::Runway => RUNWAY_PENDING,
        Vendor::Replicate => REPLICATE_STARTING,
    }
}

// ---------------------------------------------------------------------------
// Job views
// ---------------------------------------------------------------------------

/// A freshly created vendor job: its id and the vendor's status, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: PredictionId,
    pub vendor_status: String,
}

/// Read-only view of a vendor job, derived fresh on each poll.
#[derive(Debug, Clone, PartialEq)]
pub struct JobStatus {
    pub id: PredictionId,
    pub vendor_status: String,
    pub status: NormalizedStatus,
    pub output: Option<String>,
    pub error: Option<String>,
    /// Fractional progress in `0.0..=1.0` when the vendor reports it.
    pub progress: Option<f64>,
}

impl JobStatus {
    /// Build a status view, deriving the normalized status from
    /// `vendor_status`.
    pub fn from_vendor(
        vendor: Vendor,
        id: PredictionId,
        vendor_status: String,
        output: Option<String>,
        error: Option<String>,
        progress: Option<f64>,
    ) -> Self {
        let status = normalize(vendor, &vendor_status).status;
        Self {
            id,
            vendor_status,
            status,
            output,
            error,
            progress,
        }
    }
}
