//! # Domain Errors
//!
//! Typed domain error definitions.
//!
//! This module provides the [`DomainError`] enum for representing
//! domain-level errors with numeric error codes.
//!
//! # Error Code Ranges
//!
//! - **1000-1999**: Validation errors
//! - **2000-2999**: State errors
//! - **3000-3999**: Selection errors
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::errors::DomainError;
//!
//! let error = DomainError::InvalidPrice("price must be positive".to_string());
//! assert_eq!(error.code(), 1001);
//! ```

use crate::domain::value_objects::OrderStatus;
use thiserror::Error;

/// Domain-level error with numeric error codes.
///
/// | Range | Category |
/// |-------|----------|
/// | 1000-1999 | Validation errors |
/// | 2000-2999 | State errors |
/// | 3000-3999 | Selection errors |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (1000-1999)
    // ========================================================================
    /// Invalid price value.
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Invalid quantity value.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Invalid trading pair.
    #[error("invalid trading pair: {0}")]
    InvalidTradingPair(String),

    /// Invalid order side.
    #[error("invalid side: {0}")]
    InvalidSide(String),

    /// Generic validation error.
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========================================================================
    // State Errors (2000-2999)
    // ========================================================================
    /// Invalid order status transition attempted.
    #[error("invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// The current status.
        from: OrderStatus,
        /// The attempted target status.
        to: OrderStatus,
    },

    /// Operation not allowed in the current state.
    #[error("operation not allowed: {0}")]
    OperationNotAllowed(String),

    // ========================================================================
    // Selection Errors (3000-3999)
    // ========================================================================
    /// No market snapshots were supplied to the selector.
    #[error("No markets available")]
    NoMarketsAvailable,

    /// Every supplied snapshot was one-sided, crossed, or zero-priced.
    #[error("No valid prices available")]
    NoValidPrices,

    /// Valid snapshots refer to more than one trading pair.
    #[error("Markets have different trading pairs: {0}")]
    InconsistentSymbols(String),
}

impl DomainError {
    /// Returns the numeric error code.
    ///
    /// # Examples
    ///
    /// ```
    /// use crypto_order_router::domain::errors::DomainError;
    ///
    /// assert_eq!(DomainError::InvalidPrice("test".to_string()).code(), 1001);
    /// assert_eq!(DomainError::NoMarketsAvailable.code(), 3001);
    /// ```
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            // Validation errors (1000-1999)
            Self::InvalidPrice(_) => 1001,
            Self::InvalidQuantity(_) => 1002,
            Self::InvalidTradingPair(_) => 1003,
            Self::InvalidSide(_) => 1004,
            Self::ValidationError(_) => 1099,

            // State errors (2000-2999)
            Self::InvalidStateTransition { .. } => 2001,
            Self::OperationNotAllowed(_) => 2099,

            // Selection errors (3000-3999)
            Self::NoMarketsAvailable => 3001,
            Self::NoValidPrices => 3002,
            Self::InconsistentSymbols(_) => 3003,
        }
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.code() {
            1000..=1999 => "validation",
            2000..=2999 => "state",
            3000..=3999 => "selection",
            _ => "unknown",
        }
    }

    /// Returns true if this is a validation error.
    #[inline]
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self.code(), 1000..=1999)
    }

    /// Returns true if this is a state error.
    #[inline]
    #[must_use]
    pub const fn is_state_error(&self) -> bool {
        matches!(self.code(), 2000..=2999)
    }

    /// Returns true if this error came from best-execution selection.
    #[inline]
    #[must_use]
    pub const fn is_selection_error(&self) -> bool {
        matches!(self.code(), 3000..=3999)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
