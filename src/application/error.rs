//! # Application Errors
//!
//! Error types for the application layer.
//!
//! The router never returns these to its caller. They are carried through
//! one routing call and rendered into the `error` field of a failed
//! `OrderResult`.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::VenueId;
use crate::infrastructure::venues::error::VenueError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Domain error, including the selection conditions.
    #[error(transparent)]
    DomainError(#[from] DomainError),

    /// The selected venue could not be talked to.
    #[error("{venue_id}: {source}")]
    VenueError {
        /// Venue that failed.
        venue_id: VenueId,
        /// Underlying error.
        #[source]
        source: VenueError,
    },

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Creates a venue error.
    #[must_use]
    pub fn venue(venue_id: VenueId, source: VenueError) -> Self {
        Self::VenueError { venue_id, source }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns a short machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "validation",
            Self::DomainError(e) if e.is_selection_error() => "selection",
            Self::DomainError(_) => "domain",
            Self::VenueError { .. } => "venue",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
