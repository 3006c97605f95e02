//! Configuration types for figma-export

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest number of node ids the render endpoint accepts in one request
pub const MAX_BATCH_SIZE: usize = 100;

/// Main configuration for [`Exporter`](crate::Exporter)
///
/// Every field has a sensible default, so `Config::default()` talks to the
/// public Figma API with the limits the API documents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the REST API, with trailing slash (default: "https://api.figma.com/v1/")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Node ids per render request (default: 100, clamped to 1..=100)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum simultaneous file downloads (default: 16)
    #[serde(default = "default_download_concurrency")]
    pub download_concurrency: usize,

    /// Timeout applied to every HTTP request (default: 60 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            batch_size: default_batch_size(),
            download_concurrency: default_download_concurrency(),
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Check that the configuration can drive an export run
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api_base).map_err(|e| Error::Config {
            message: format!("invalid api_base '{}': {}", self.api_base, e),
            key: Some("api_base".to_string()),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("api_base '{}' cannot be used as a base URL", self.api_base),
                key: Some("api_base".to_string()),
            });
        }
        if self.batch_size == 0 {
            return Err(Error::Config {
                message: "batch_size must be at least 1".to_string(),
                key: Some("batch_size".to_string()),
            });
        }
        if self.download_concurrency == 0 {
            return Err(Error::Config {
                message: "download_concurrency must be at least 1".to_string(),
                key: Some("download_concurrency".to_string()),
            });
        }
        Ok(())
    }

    /// Batch size actually used for render requests
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }

    /// API base URL, guaranteed to end with a slash so relative joins keep the version path
    pub(crate) fn api_base_url(&self) -> Result<url::Url> {
        let mut base = self.api_base.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        url::Url::parse(&base).map_err(|e| Error::Config {
            message: format!("invalid api_base '{}': {}", self.api_base, e),
            key: Some("api_base".to_string()),
        })
    }
}

fn default_api_base() -> String {
    "https://api.figma.com/v1/".to_string()
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_download_concurrency() -> usize {
    16
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
