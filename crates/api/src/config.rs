use adforge_core::error::CoreError;
use adforge_core::generation::REPLICATE_DEFAULT_VIDEO_VERSION;
use adforge_vendors::replicate::DEFAULT_REPLICATE_API_URL;
use adforge_vendors::runway::DEFAULT_RUNWAY_API_URL;
use adforge_vendors::{ReplicateConfig, RunwayConfig};

/// Server configuration loaded from environment variables.
///
/// All fields except the vendor credentials have defaults suitable for
/// local development. A missing credential does not stop the server; it
/// makes every call to that vendor's endpoints fail with a configuration
/// error.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Timeout for outbound vendor calls. `None` keeps the HTTP client's
    /// default (no overall timeout).
    pub vendor_timeout_secs: Option<u64>,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
    pub runway: RunwayConfig,
    pub replicate: ReplicateConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                         |
    /// |---------------------------|---------------------------------|
    /// | `HOST`                    | `0.0.0.0`                       |
    /// | `PORT`                    | `3000`                          |
    /// | `VENDOR_TIMEOUT_SECS`     | unset                           |
    /// | `LOG_FORMAT`              | `text` (`json` for JSON lines)  |
    /// | `RUNWAY_API_KEY`          | unset                           |
    /// | `RUNWAY_API_URL`          | `https://api.dev.runwayml.com`  |
    /// | `REPLICATE_API_TOKEN`     | unset                           |
    /// | `REPLICATE_API_URL`       | `https://api.replicate.com`     |
    /// | `REPLICATE_VIDEO_VERSION` | built-in image-to-video version |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&var, "PORT")?.unwrap_or(3000);
        let vendor_timeout_secs = parse_var(&var, "VENDOR_TIMEOUT_SECS")?;
        let log_json = var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let runway = RunwayConfig {
            api_key: var("RUNWAY_API_KEY"),
            api_url: var("RUNWAY_API_URL").unwrap_or_else(|| DEFAULT_RUNWAY_API_URL.into()),
        };

        let replicate = ReplicateConfig {
            api_token: var("REPLICATE_API_TOKEN"),
            api_url: var("REPLICATE_API_URL").unwrap_or_else(|| DEFAULT_REPLICATE_API_URL.into()),
            video_version: var("REPLICATE_VIDEO_VERSION")
                .unwrap_or_else(|| REPLICATE_DEFAULT_VIDEO_VERSION.into()),
        };

        Ok(Self {
            host,
            port,
            vendor_timeout_secs,
            log_json,
            runway,
            replicate,
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| CoreError::Configuration(format!("{key} must be valid: {e}")))
        })
        .transpose()
}
