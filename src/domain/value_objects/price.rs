//! # Price Value Object
//!
//! An observed price level on a venue.
//!
//! This module provides the [`Price`] type: a non-negative [`Decimal`]
//! amount together with the moment it was observed. Prices compare and
//! order by amount only; the observation time is metadata.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::value_objects::price::Price;
//! use crypto_order_router::domain::value_objects::timestamp::Timestamp;
//! use rust_decimal::Decimal;
//!
//! let ask = Price::new(Decimal::new(5_000_000, 2), Timestamp::now()).unwrap();
//! let bid = Price::new(Decimal::new(4_999_000, 2), Timestamp::now()).unwrap();
//! assert!(bid < ask);
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::timestamp::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A validated, timestamped price.
///
/// # Invariants
///
/// - `amount >= 0`. Venues may report zero for illiquid books; such prices
///   are representable but never selectable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Price {
    amount: Decimal,
    observed_at: Timestamp,
}

impl Price {
    /// Creates a new price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the amount is negative.
    pub fn new(amount: Decimal, observed_at: Timestamp) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::InvalidPrice(format!(
                "price cannot be negative: {amount}"
            )));
        }
        Ok(Self {
            amount,
            observed_at,
        })
    }

    /// Creates a price observed now.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrice` if the amount is negative.
    pub fn observed_now(amount: Decimal) -> DomainResult<Self> {
        Self::new(amount, Timestamp::now())
    }

    /// Returns the price amount.
    #[inline]
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns when the price was observed.
    #[inline]
    #[must_use]
    pub const fn observed_at(&self) -> Timestamp {
        self.observed_at
    }

    /// Returns true if the amount is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount.cmp(&other.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}
