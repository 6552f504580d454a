//! # Domain Errors
//!
//! Typed error types for domain operations.
//!
//! Error codes are organized by category:
//! - 1000-1999: Validation errors
//! - 2000-2999: State errors
//! - 3000-3999: Selection errors
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::errors::{DomainError, DomainResult};
//!
//! fn validate_quantity(quantity: f64) -> DomainResult<f64> {
//!     if quantity <= 0.0 {
//!         return Err(DomainError::InvalidQuantity("quantity must be positive".to_string()));
//!     }
//!     Ok(quantity)
//! }
//! ```

pub mod domain_error;

pub use domain_error::{DomainError, DomainResult};
