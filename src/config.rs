//! Configuration management for the Tidio MCP server.
//!
//! Credentials come from the environment. Missing credentials are not a
//! local error: they default to empty strings and the Tidio API rejects
//! the requests instead.

use std::env;

use url::Url;

use crate::error::TidioError;

/// Default origin of the Tidio OpenAPI.
pub const DEFAULT_BASE_URL: &str = "https://api.tidio.com";

/// Configuration for connecting to the Tidio OpenAPI.
///
/// The client secret is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Origin all API paths are appended to (e.g., `https://api.tidio.com`).
    pub base_url: String,

    /// OpenAPI client ID.
    pub client_id: String,

    /// OpenAPI client secret.
    /// This value must never be logged or included in error messages.
    pub client_secret: String,
}

impl Config {
    /// Creates a configuration for the default Tidio origin.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Replaces the API origin, validating and normalizing it.
    ///
    /// # Errors
    ///
    /// Returns `TidioError::Config` if the URL has no http(s) scheme or
    /// does not parse.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, TidioError> {
        self.base_url = Self::validate_base_url(base_url.into())?;
        Ok(self)
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TIDIO_CLIENT_ID`: OpenAPI client ID (empty if unset)
    /// - `TIDIO_CLIENT_SECRET`: OpenAPI client secret (empty if unset)
    /// - `TIDIO_API_BASE_URL`: optional origin override
    ///
    /// # Errors
    ///
    /// Returns `TidioError::Config` only if `TIDIO_API_BASE_URL` is set to
    /// an invalid value.
    pub fn from_env() -> Result<Self, TidioError> {
        let client_id = Self::get_optional_env("TIDIO_CLIENT_ID").unwrap_or_default();
        let client_secret = Self::get_optional_env("TIDIO_CLIENT_SECRET").unwrap_or_default();

        if client_id.is_empty() || client_secret.is_empty() {
            tracing::warn!(
                "TIDIO_CLIENT_ID or TIDIO_CLIENT_SECRET is not set; \
                 requests will be rejected by the Tidio API"
            );
        }

        let config = Self::new(client_id, client_secret);

        match Self::get_optional_env("TIDIO_API_BASE_URL") {
            Some(base_url) => config.with_base_url(base_url),
            None => Ok(config),
        }
    }

    /// Returns the client secret. Never log the returned value.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, TidioError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TidioError::invalid_config(
                "TIDIO_API_BASE_URL must start with http:// or https://",
            ));
        }

        Url::parse(&url).map_err(|e| {
            TidioError::invalid_config(format!("TIDIO_API_BASE_URL is not a valid URL: {}", e))
        })?;

        Ok(url)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
