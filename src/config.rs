use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Production TSheets REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://rest.tsheets.com/api/v1";

/// Applied to every outbound provider call unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings injected into the provider and OAuth clients.
#[derive(Debug, Clone)]
pub struct Config {
    api_base: String,
    pub client_id: String,
    pub client_secret: String,
    pub request_timeout: Duration,
    pub logo_path: PathBuf,
}

impl Config {
    /// Build a config for the given provider base URL and OAuth app credentials.
    ///
    /// The base URL must be an absolute http(s) URL; a trailing slash is dropped
    /// so resource paths can be appended directly.
    pub fn new(api_base: &str, client_id: &str, client_secret: &str) -> Result<Self> {
        let parsed = url::Url::parse(api_base)
            .map_err(|e| Error::Config(format!("invalid provider base URL {api_base:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "provider base URL must use http or https: {api_base}"
            )));
        }

        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            logo_path: PathBuf::from("logo.svg"),
        })
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = path.into();
        self
    }

    /// Provider base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}
