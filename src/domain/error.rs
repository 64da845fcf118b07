//! SDK error types with proper error chaining.

use std::fmt;

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
    #[error("TLS material error: {0}")]
    Tls(String),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Unexpected response status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Deserialization error: {0}")]
    Decode(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

/// Application-level failure reported inside a 2xx response envelope.
///
/// `Display` renders the server message verbatim so callers can compare it
/// directly. The decoded response body is kept so the envelope that carried
/// the code can still be inspected with [`CodedError::response`].
#[derive(Debug, Clone)]
pub struct CodedError {
    code: i32,
    message: String,
    body: serde_json::Value,
}

impl CodedError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            body: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Decodes the carried response body into `T`.
    ///
    /// Returns `None` when no body was captured or it does not fit `T`.
    pub fn response<T: DeserializeOwned>(&self) -> Option<T> {
        if self.body.is_null() {
            return None;
        }
        serde_json::from_value(self.body.clone()).ok()
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CodedError {}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Coded(#[from] CodedError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Envelope code, present only for application-level failures.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.as_coded().map(CodedError::code)
    }

    #[must_use]
    pub fn as_coded(&self) -> Option<&CodedError> {
        match self {
            ApiError::Coded(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a rejected (non-2xx) response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.into())
    }
}
