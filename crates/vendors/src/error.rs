use adforge_core::vendor::Vendor;

/// Errors from the vendor client layer.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    /// The vendor's bearer token was not provided at startup.
    #[error("{} credential is not configured (set {env_var})", .vendor.display_name())]
    MissingCredential {
        vendor: Vendor,
        env_var: &'static str,
    },

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor returned a non-2xx status code.
    #[error("{} API error ({status})", .vendor.display_name())]
    Api {
        vendor: Vendor,
        /// HTTP status code.
        status: u16,
        /// Vendor error payload: parsed JSON when possible, otherwise the
        /// raw body as a JSON string.
        body: serde_json::Value,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid {} API URL: {url}", .vendor.display_name())]
    InvalidUrl { vendor: Vendor, url: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected {} response: {message}", .vendor.display_name())]
    Decode { vendor: Vendor, message: String },
}

impl VendorError {
    pub fn missing_credential(vendor: Vendor) -> Self {
        VendorError::MissingCredential {
            vendor,
            env_var: vendor.credential_env_var(),
        }
    }
}
