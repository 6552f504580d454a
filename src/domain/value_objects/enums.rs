//! # Domain Enums
//!
//! Order side and order lifecycle status.
//!
//! # Order Status State Machine
//!
//! ```text
//! Pending ──→ Filled
//!    │
//!    └─────→ Failed
//! ```
//!
//! `Filled` and `Failed` are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    /// The enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Side of a market order.
///
/// # Examples
///
/// ```
/// use crypto_order_router::domain::value_objects::OrderSide;
///
/// let side: OrderSide = "BUY".parse().unwrap();
/// assert_eq!(side, OrderSide::Buy);
/// assert_eq!(side.to_string(), "buy");
/// assert!("hold".parse::<OrderSide>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Acquire the base asset.
    Buy,
    /// Dispose of the base asset.
    Sell,
}

impl OrderSide {
    /// Returns the lowercase wire form (`buy`/`sell`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderSide {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(ParseEnumError::new("order side", s)),
        }
    }
}

/// Normalized order lifecycle status.
///
/// Every venue vocabulary is mapped onto these three states. `Pending` is
/// the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, not yet known to be filled or failed.
    #[default]
    Pending,
    /// Executed by the venue (terminal).
    Filled,
    /// Rejected, cancelled, or never placed (terminal).
    Failed,
}

impl OrderStatus {
    /// Returns true if this is a terminal state.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Filled | Self::Failed)
    }

    /// Returns true if this state can transition to the target state.
    ///
    /// Only `Pending → Filled` and `Pending → Failed` are allowed.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Filled) | (Self::Pending, Self::Failed)
        )
    }

    /// Returns the lowercase form used in results.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Filled => "filled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "filled" => Ok(Self::Filled),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseEnumError::new("order status", s)),
        }
    }
}
