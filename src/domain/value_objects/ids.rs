//! # Identity Value Objects
//!
//! Type-safe identity wrappers for domain identifiers.
//!
//! - [`OrderId`] - UUID-based identifier generated locally for every routed order
//! - [`VenueId`] - String-based venue identifier (e.g. `binance`, `okx`)

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Locally generated order identifier.
///
/// Created by the router before any venue is contacted, so every routing
/// attempt can be traced even when no venue ever accepts the order.
///
/// # Examples
///
/// ```
/// use crypto_order_router::domain::value_objects::ids::OrderId;
///
/// let a = OrderId::new_v4();
/// let b = OrderId::new_v4();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Creates an order ID from an existing UUID.
    #[inline]
    #[must_use]
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a new random order ID using UUID v4.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for OrderId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Venue identifier.
///
/// Ordered lexicographically so venue iteration is reproducible.
///
/// # Examples
///
/// ```
/// use crypto_order_router::domain::value_objects::ids::VenueId;
///
/// let venue_id = VenueId::new("binance");
/// assert_eq!(venue_id.as_str(), "binance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    /// Creates a new venue ID from a string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the venue ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the VenueId and returns the inner String.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VenueId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
