//! Response handling shared by the vendor clients.

use std::time::Duration;

use adforge_core::vendor::Vendor;
use serde::de::DeserializeOwned;

use crate::error::VendorError;

/// Build the HTTP client shared by all vendor clients.
///
/// `timeout` of `None` leaves reqwest's default (no overall timeout).
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Return the configured bearer token, treating blank values as unset.
pub(crate) fn require_credential(
    vendor: Vendor,
    credential: Option<&str>,
) -> Result<&str, VendorError> {
    credential
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| VendorError::missing_credential(vendor))
}

/// Normalize a configured base URL so paths can be appended with `/`.
pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Append `segments` to `base`, percent-encoding each one.
///
/// A segment containing `/`, `?` or `#` stays a single segment, so a
/// caller-supplied job id cannot move the request elsewhere on the vendor
/// host.
pub(crate) fn endpoint_url(
    vendor: Vendor,
    base: &str,
    segments: &[&str],
) -> Result<reqwest::Url, VendorError> {
    let invalid = || VendorError::InvalidUrl {
        vendor,
        url: base.to_string(),
    };
    let mut url = reqwest::Url::parse(base).map_err(|_| invalid())?;
    url.path_segments_mut()
        .map_err(|_| invalid())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`VendorError::Api`] carrying the vendor's
/// payload on failure.
pub(crate) async fn ensure_success(
    vendor: Vendor,
    response: reqwest::Response,
) -> Result<reqwest::Response, VendorError> {
    let status = response.status();
    if !status.is_success() {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(VendorError::Api {
            vendor,
            status: status.as_u16(),
            body: error_payload(text),
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: DeserializeOwned>(
    vendor: Vendor,
    response: reqwest::Response,
) -> Result<T, VendorError> {
    let response = ensure_success(vendor, response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| VendorError::Decode {
        vendor,
        message: e.to_string(),
    })
}

/// Keep the vendor's error body as structured JSON when it is JSON.
fn error_payload(text: String) -> serde_json::Value {
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}

/// First URL in a vendor `output` field, which may be a single string or
/// an array of strings.
pub(crate) fn first_output_url(output: &serde_json::Value) -> Option<String> {
    match output {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    }
}
