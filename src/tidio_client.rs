//! HTTP client for the Tidio OpenAPI.
//!
//! This module provides `TidioClient`, a thin adapter over one shared
//! `reqwest::Client`. Every verb method funnels into [`TidioClient::request`],
//! which attaches the fixed authentication headers, applies the request
//! timeout and classifies failures into an [`ApiError`].
//!
//! # Failure Handling
//!
//! Requests are never retried. A request that exceeds the timeout fails
//! with [`ApiErrorKind::Timeout`](crate::error::ApiErrorKind::Timeout);
//! connection faults and non-2xx statuses fail with
//! [`ApiErrorKind::RequestFailed`](crate::error::ApiErrorKind::RequestFailed).
//!
//! # Security
//!
//! The client secret is sent as a sensitive header and never logged.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{ApiError, ApiErrorKind, TidioError};

/// Request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The Accept header value pinning OpenAPI version 1.
pub const ACCEPT_HEADER: &str = "application/json; version=1";

/// Header carrying the OpenAPI client ID.
pub const CLIENT_ID_HEADER: &str = "X-Tidio-Openapi-Client-Id";

/// Header carrying the OpenAPI client secret.
pub const CLIENT_SECRET_HEADER: &str = "X-Tidio-Openapi-Client-Secret";

/// HTTP client for the Tidio OpenAPI.
///
/// Immutable after construction. Cloning is cheap and shares the
/// underlying connection pool, so concurrent tool calls can each hold a
/// clone.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = TidioClient::new(&config)?;
///
/// let departments = client.get("/departments").await?;
/// ```
#[derive(Clone)]
pub struct TidioClient {
    /// The underlying HTTP client with the auth headers preset.
    http: Client,

    /// Origin all paths are appended to.
    base_url: String,

    /// Kept only to redact it from error messages.
    /// SECURITY: Never log this value!
    client_secret: String,
}

impl TidioClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `TidioError::InvalidHeader` if a credential is not a valid
    /// header value, or `TidioError::HttpClient` if the HTTP client fails
    /// to initialize.
    pub fn new(config: &Config) -> Result<Self, TidioError> {
        Self::with_timeout(config, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom request timeout.
    pub(crate) fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, TidioError> {
        let http = Client::builder()
            .default_headers(Self::auth_headers(config)?)
            .timeout(timeout)
            .build()
            .map_err(TidioError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_secret: config.client_secret().to_string(),
        })
    }

    /// Builds the three headers sent with every request.
    fn auth_headers(config: &Config) -> Result<HeaderMap, TidioError> {
        let client_id = HeaderValue::from_str(&config.client_id).map_err(|_| {
            TidioError::InvalidHeader {
                header: CLIENT_ID_HEADER,
            }
        })?;

        let mut client_secret = HeaderValue::from_str(config.client_secret()).map_err(|_| {
            TidioError::InvalidHeader {
                header: CLIENT_SECRET_HEADER,
            }
        })?;
        client_secret.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-tidio-openapi-client-id"), client_id);
        headers.insert(
            HeaderName::from_static("x-tidio-openapi-client-secret"),
            client_secret,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        Ok(headers)
    }

    /// Returns the client secret for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn secret_for_sanitization(&self) -> &str {
        &self.client_secret
    }

    /// Tests connectivity and credentials by listing departments.
    ///
    /// # Errors
    ///
    /// Returns `TidioError::ConnectionTest` with a hint about the likely cause.
    pub async fn test_connection(&self) -> Result<(), TidioError> {
        tracing::debug!("Testing connection to Tidio API");

        match self.get("/departments").await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(TidioError::Api(e)) if e.kind == ApiErrorKind::Timeout => {
                Err(TidioError::connection_test(format!(
                    "{} - verify TIDIO_API_BASE_URL is correct and the API is reachable",
                    e
                )))
            }
            Err(TidioError::Api(e)) => {
                let message = TidioError::sanitize_message(&e.message, &self.client_secret);
                Err(TidioError::connection_test(format!(
                    "{} - verify TIDIO_CLIENT_ID and TIDIO_CLIENT_SECRET are correct",
                    message.trim_end()
                )))
            }
            Err(e) => Err(TidioError::connection_test(e.sanitized_display(&self.client_secret))),
        }
    }

    /// Makes a GET request.
    pub async fn get(&self, path: &str) -> Result<Value, TidioError> {
        self.request::<Value>(Method::GET, path, None).await
    }

    /// Makes a POST request with an optional JSON body.
    pub async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<Value, TidioError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, body).await
    }

    /// Makes a PUT request with an optional JSON body.
    pub async fn put<B>(&self, path: &str, body: Option<&B>) -> Result<Value, TidioError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, body).await
    }

    /// Makes a PATCH request with an optional JSON body.
    pub async fn patch<B>(&self, path: &str, body: Option<&B>) -> Result<Value, TidioError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PATCH, path, body).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value, TidioError> {
        self.request::<Value>(Method::DELETE, path, None).await
    }

    /// Makes one request to the Tidio API.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - Path relative to the origin, including any query string
    /// * `body` - Optional body, sent as JSON
    ///
    /// # Returns
    ///
    /// The parsed JSON body, or an empty object when the body is empty.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, TidioError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(method = %method, path = %path, "Making Tidio API request");

        let mut req = self.http.request(method.clone(), &url);

        if let Some(body) = body {
            let json = serde_json::to_vec(body)?;
            req = req.header(CONTENT_TYPE, "application/json").body(json);
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.classify(&method, path, &e))?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .error_for_status_ref()
                .err()
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("HTTP status {} for url ({})", status, url));
            let body = response.text().await.unwrap_or_default();
            return Err(self.fail(&method, path, ApiError::request_failed(detail, &body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(&method, path, &e))?;

        parse_body(&bytes)
    }

    /// Converts a transport error into a classified API error.
    fn classify(&self, method: &Method, path: &str, e: &reqwest::Error) -> TidioError {
        let error = if e.is_timeout() {
            ApiError::timeout()
        } else {
            ApiError::request_failed(e, "")
        };
        self.fail(method, path, error)
    }

    fn fail(&self, method: &Method, path: &str, error: ApiError) -> TidioError {
        tracing::debug!(
            method = %method,
            path = %path,
            kind = ?error.kind,
            error = %TidioError::sanitize_message(&error.message, &self.client_secret),
            "Tidio API request failed"
        );
        TidioError::Api(error)
    }
}

/// Parses a 2xx response body. An empty or whitespace-only body is `{}`.
fn parse_body(bytes: &[u8]) -> Result<Value, TidioError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(bytes)?;
    tracing::trace!(body = %value, "Tidio API response");
    Ok(value)
}
