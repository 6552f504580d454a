//! # Venue Errors
//!
//! Error types for exchange adapter operations.
//!
//! The router distinguishes two families of failure:
//!
//! - [`VenueError::QuoteUnavailable`]: the venue answered but has no market
//!   for the requested pair. The aggregator treats it as absence.
//! - Everything else: the venue could not be reached, answered with an
//!   unexpected status, or returned a payload we could not decode.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::infrastructure::venues::error::VenueError;
//!
//! let err = VenueError::quote_unavailable("Invalid symbol.");
//! assert!(err.is_quote_unavailable());
//! assert!(!err.is_retryable());
//!
//! let err = VenueError::http_status(503, "Service Unavailable");
//! assert!(err.is_retryable());
//! ```

use crate::domain::errors::DomainError;
use thiserror::Error;

/// Error raised by an exchange adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// The venue reports no market for the requested pair.
    #[error("quote unavailable: {message}")]
    QuoteUnavailable {
        /// Venue-provided reason.
        message: String,
    },

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// The venue did not answer within the deadline.
    #[error("timeout: {message} (after {duration_ms}ms)")]
    Timeout {
        /// What timed out.
        message: String,
        /// The deadline that elapsed.
        duration_ms: u64,
    },

    /// Unexpected HTTP status.
    #[error("http status {status}: {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The payload did not match the venue's documented shape.
    #[error("protocol error: {message}")]
    ProtocolError {
        /// Error details.
        message: String,
    },

    /// The request could not be built from the given input.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Error details.
        message: String,
    },

    /// The venue rejected our credentials or signature.
    #[error("authentication failed: {message}")]
    Authentication {
        /// Venue-provided reason.
        message: String,
    },

    /// Bug or unexpected condition on our side.
    #[error("internal error: {message}")]
    InternalError {
        /// Error details.
        message: String,
    },
}

impl VenueError {
    /// Creates a `QuoteUnavailable` error.
    #[must_use]
    pub fn quote_unavailable(message: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            message: message.into(),
        }
    }

    /// Creates a `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a `Timeout` error.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, duration_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            duration_ms,
        }
    }

    /// Creates an `HttpStatus` error.
    #[must_use]
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a `ProtocolError`.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates an `Authentication` error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates an `InternalError`.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Returns true if the venue simply has no market for the pair.
    #[inline]
    #[must_use]
    pub fn is_quote_unavailable(&self) -> bool {
        matches!(self, Self::QuoteUnavailable { .. })
    }

    /// Returns true if a later attempt could plausibly succeed.
    ///
    /// Informational only; the router never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns a short machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QuoteUnavailable { .. } => "quote_unavailable",
            Self::Connection { .. } => "connection",
            Self::Timeout { .. } => "timeout",
            Self::HttpStatus { .. } => "http_status",
            Self::ProtocolError { .. } => "protocol",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Authentication { .. } => "authentication",
            Self::InternalError { .. } => "internal",
        }
    }
}

impl From<reqwest::Error> for VenueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout_with_duration(err.to_string(), 0)
        } else if err.is_decode() {
            Self::protocol_error(format!("failed to decode response: {err}"))
        } else if err.is_builder() {
            Self::invalid_request(err.to_string())
        } else {
            Self::connection(err.to_string())
        }
    }
}

impl From<DomainError> for VenueError {
    fn from(err: DomainError) -> Self {
        Self::internal_error(err.to_string())
    }
}

/// Result type for venue operations.
pub type VenueResult<T> = Result<T, VenueError>;
