//! Error taxonomy of the client.
//!
//! Every failure surfaces as one [`Error`]. Responses with a non-2xx status
//! are classified by [`Error::from_response`] into the variant matching the
//! status code; all other faults (connection, timeout, malformed payloads)
//! use the remaining variants. Callers can match a narrow variant or use
//! [`Error::status`] and [`Error::body`] on any error.

use std::fmt;

use http::StatusCode;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A non-2xx response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status of the response.
    pub status: StatusCode,
    /// Human readable message, taken from the body when it carries one.
    pub message: String,
    /// Raw response body.
    pub body: String,
}

impl ApiError {
    /// Builds an error from a status and raw body, extracting the message.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = extract_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
        });
        Self {
            status,
            message,
            body,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key)?.as_str())
        .filter(|msg| !msg.is_empty())
        .map(str::to_owned)
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 409.
    Conflict,
    /// Anything else, with or without an HTTP status.
    Other,
}

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request was malformed or failed validation (HTTP 400).
    #[error("bad request: {0}")]
    BadRequest(ApiError),
    /// Missing or invalid API key (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(ApiError),
    /// The key is valid but not allowed to perform the call (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(ApiError),
    /// Unknown resource (HTTP 404).
    #[error("not found: {0}")]
    NotFound(ApiError),
    /// The call conflicts with current server state (HTTP 409).
    #[error("conflict: {0}")]
    Conflict(ApiError),
    /// Any other non-2xx status.
    #[error("unexpected HTTP status: {0}")]
    Status(ApiError),
    /// The request never produced a response.
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The request or stream exceeded its time limit.
    #[error("timed out: {context}")]
    Timeout {
        /// Human-readable context.
        context: &'static str,
    },
    /// A 2xx body or an event payload was not the expected JSON.
    #[error("failed to decode JSON: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// The offending payload, when available.
        body: Option<String>,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The runtime behind a blocking stream could not be started.
    #[error("I/O error: {context}: {source}")]
    Io {
        /// Human-readable context.
        context: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An event stream ended before a terminal event arrived.
    #[error("event stream disconnected before a terminal event")]
    Disconnected,
    /// A request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
    /// An argument was rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Classifies a non-2xx response by its status code.
    #[must_use]
    pub fn from_response(status: StatusCode, body: impl Into<String>) -> Self {
        let api = ApiError::new(status, body);
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest(api),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(api),
            StatusCode::FORBIDDEN => Self::Forbidden(api),
            StatusCode::NOT_FOUND => Self::NotFound(api),
            StatusCode::CONFLICT => Self::Conflict(api),
            _ => Self::Status(api),
        }
    }

    /// Maps a reqwest failure, separating timeouts from other transport faults.
    pub(crate) fn http(context: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { context }
        } else {
            Self::Http { context, source }
        }
    }

    #[cfg(feature = "blocking")]
    pub(crate) const fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Coarse classification for catch-narrow matching.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            _ => ErrorKind::Other,
        }
    }

    /// The response behind this error, if the service answered.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::BadRequest(api)
            | Self::Unauthorized(api)
            | Self::Forbidden(api)
            | Self::NotFound(api)
            | Self::Conflict(api)
            | Self::Status(api) => Some(api),
            _ => None,
        }
    }

    /// HTTP status, if the service answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.api_error().map(|api| api.status)
    }

    /// Raw response body or offending payload, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Decode { body, .. } => body.as_deref(),
            other => other.api_error().map(|api| api.body.as_str()),
        }
    }

    /// Returns `true` for [`Error::Timeout`].
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Errors raised while building a client.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The base URL is not `http` or `https`.
    #[error("unsupported base URL scheme in `{0}`")]
    UnsupportedScheme(String),
    /// The base URL cannot carry a path.
    #[error("base URL `{0}` cannot carry a path")]
    NotABase(String),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
