//! Third-party generation vendors this service proxies to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A vendor performing the actual generative work.
///
/// Serialized lowercase, which is also the form used in URL paths
/// (`/video/runway/generate`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Runway,
    Replicate,
}

/// All supported vendors, in display order.
pub const ALL_VENDORS: &[Vendor] = &[Vendor::Runway, Vendor::Replicate];

impl Vendor {
    pub fn as_str(self) -> &'static str {
        match self {
            Vendor::Runway => "runway",
            Vendor::Replicate => "replicate",
        }
    }

    /// Human-readable vendor name used in log lines and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Vendor::Runway => "Runway",
            Vendor::Replicate => "Replicate",
        }
    }

    /// Environment variable holding this vendor's bearer token.
    pub fn credential_env_var(self) -> &'static str {
        match self {
            Vendor::Runway => "RUNWAY_API_KEY",
            Vendor::Replicate => "REPLICATE_API_TOKEN",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_VENDORS
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = ALL_VENDORS.iter().map(|v| v.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown vendor '{s}'. Must be one of: {}",
                    known.join(", ")
                ))
            })
    }
}
