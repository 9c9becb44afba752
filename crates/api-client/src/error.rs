//! Error types and normalization for the API client
//!
//! The backend reports failures under an `error` key on some endpoints and a
//! `message` key on others. Every wrapper funnels its failure through
//! [`normalize`] with the [`ErrorSpec`] for that endpoint, so callers always
//! get one [`ApiError`] whose [`ApiError::message`] is ready to show.

use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
///
/// `Display` prints only the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message taken from the body, or the operation fallback
        message: String,
    },

    /// No response was received (connect error, timeout, reset)
    #[error("{message}")]
    Transport {
        /// Operation fallback message
        message: String,
        /// Underlying transport error, for logs
        detail: String,
    },

    /// A success response whose body could not be decoded
    #[error("{message}")]
    Decode {
        /// Operation fallback message
        message: String,
        /// Decoder error, for logs
        detail: String,
    },

    /// Client misconfiguration (bad URL, zero timeout)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The user-facing message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. }
            | Self::Transport { message, .. }
            | Self::Decode { message, .. }
            | Self::Config(message) => message,
        }
    }

    /// HTTP status when the backend answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if (400..500).contains(status))
    }

    /// Check if the backend refused the credentials or token
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401 | 403, .. })
    }
}

/// Body key an endpoint uses for its error text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorField {
    /// `{"error": "..."}`
    Error,
    /// `{"message": "..."}`
    Message,
}

impl ErrorField {
    /// JSON key
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Message => "message",
        }
    }
}

/// Per-endpoint error handling: where to look and what to say otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSpec {
    /// Operation name used in logs and metrics, e.g. `admin.block_vendor`
    pub operation: &'static str,
    /// Body key carrying the backend message
    pub field: ErrorField,
    /// Message used when the backend gives none
    pub fallback: &'static str,
}

impl ErrorSpec {
    /// Describe an endpoint's error contract
    #[must_use]
    pub const fn new(operation: &'static str, field: ErrorField, fallback: &'static str) -> Self {
        Self {
            operation,
            field,
            fallback,
        }
    }
}

/// A failure as the transport saw it, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawError {
    /// No response at all
    Transport(String),
    /// A response with a non-success status and its raw body
    Response {
        /// HTTP status code
        status: u16,
        /// Raw body text
        body: String,
    },
    /// A success response that failed to decode
    Decode(String),
}

impl fmt::Display for RawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Response { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Decode(e) => write!(f, "decode: {e}"),
        }
    }
}

/// Turn a raw failure into the uniform [`ApiError`].
///
/// A string under `spec.field` in a JSON error body becomes the message
/// verbatim. Anything else yields `spec.fallback`.
#[must_use]
pub fn normalize(raw: RawError, spec: ErrorSpec) -> ApiError {
    let error = match &raw {
        RawError::Response { status, body } => ApiError::Rejected {
            status: *status,
            message: extract_message(body, spec.field)
                .unwrap_or_else(|| spec.fallback.to_string()),
        },
        RawError::Transport(detail) => ApiError::Transport {
            message: spec.fallback.to_string(),
            detail: detail.clone(),
        },
        RawError::Decode(detail) => ApiError::Decode {
            message: spec.fallback.to_string(),
            detail: detail.clone(),
        },
    };

    warn!(
        operation = spec.operation,
        raw = %raw,
        message = error.message(),
        "Request failed"
    );

    error
}

fn extract_message(body: &str, field: ErrorField) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get(field.key())
        .and_then(Value::as_str)
        .map(str::to_string)
}
