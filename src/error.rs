//! Error types for the Tidio MCP server.
//!
//! This module defines `TidioError`, the unified error type used throughout
//! the crate. Two taxonomies matter to tool callers:
//!
//! - [`ApiError`]: raised by the HTTP adapter, tagged with an
//!   [`ApiErrorKind`] so callers can branch without matching on text.
//! - [`ValidationErrors`]: raised by the tool layer before any request is
//!   sent.
//!
//! # Security
//!
//! Use `sanitize_message()` before logging messages that may echo data
//! from the remote service, so the client secret never leaks.

use std::fmt;

use thiserror::Error;

/// Message used for every request that exceeded the timeout.
pub const TIMEOUT_MESSAGE: &str = "Tidio API request timed out.";

/// Prefix of every non-timeout request failure message.
pub const REQUEST_FAILED_PREFIX: &str = "Tidio API request failed.";

/// Classification of an adapter failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request did not complete within the timeout.
    Timeout,
    /// Connection-level fault or non-2xx status.
    RequestFailed,
}

/// A failed call to the Tidio API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    /// What went wrong.
    pub kind: ApiErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Creates the timeout error.
    pub fn timeout() -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            message: TIMEOUT_MESSAGE.to_string(),
        }
    }

    /// Creates a request failure from the transport detail and the response
    /// body (empty when there was no response).
    pub fn request_failed(detail: impl fmt::Display, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::RequestFailed,
            message: format!("{} {} {}", REQUEST_FAILED_PREFIX, detail, body),
        }
    }
}

/// One or more violated input constraints.
///
/// Displays as the messages joined by `"; "`, so a single violation
/// displays as exactly its message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    /// Returns true if nothing was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The violation messages in the order they were found.
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl From<String> for ValidationErrors {
    fn from(message: String) -> Self {
        Self(vec![message])
    }
}

impl From<&str> for ValidationErrors {
    fn from(message: &str) -> Self {
        Self(vec![message.to_string()])
    }
}

/// Unified error type for all crate operations.
#[derive(Error, Debug)]
pub enum TidioError {
    /// Configuration error - invalid environment values.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// A credential could not be used as an HTTP header value.
    #[error("invalid header value for {header}")]
    InvalidHeader {
        /// Name of the offending header.
        header: &'static str,
    },

    /// The Tidio API call timed out or failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool input failed validation; no request was sent.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Startup connectivity probe failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl TidioError {
    /// Creates a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        TidioError::Config(message.into())
    }

    /// Creates a validation error with a single violation.
    pub fn validation(message: impl Into<String>) -> Self {
        let message: String = message.into();
        TidioError::Validation(ValidationErrors::from(message))
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        TidioError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns the adapter failure kind, if this is an API error.
    #[must_use]
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            TidioError::Api(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Returns true if the API request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.api_kind() == Some(ApiErrorKind::Timeout)
    }

    /// Returns true if the error was raised before any request was sent.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, TidioError::Validation(_))
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// This error's display message with `secret` redacted.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
