//! # Quantity Value Object
//!
//! Strictly positive order quantity.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::value_objects::quantity::Quantity;
//! use rust_decimal::Decimal;
//!
//! let qty = Quantity::new(Decimal::new(1, 2)).unwrap();
//! assert_eq!(qty.to_string(), "0.01");
//!
//! assert!(Quantity::new(Decimal::ZERO).is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated order quantity.
///
/// # Invariants
///
/// - Quantity is always > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// Creates a new quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the value is zero or negative.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidQuantity(format!(
                "quantity must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the inner Decimal value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns the quantity in the plain decimal form venues expect
    /// (no exponent, no trailing zeros).
    #[must_use]
    pub fn to_wire_string(self) -> String {
        self.0.normalize().to_string()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|_| DomainError::InvalidQuantity(format!("not a decimal: '{s}'")))?;
        Self::new(decimal)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_zero_and_negative() {
        assert!(Quantity::new(Decimal::ZERO).is_err());
        assert!(Quantity::new(dec!(-0.5)).is_err());
    }

    #[test]
    fn wire_string_strips_trailing_zeros() {
        let qty = Quantity::new(dec!(1.500)).unwrap();
        assert_eq!(qty.to_wire_string(), "1.5");
    }

    #[test]
    fn wire_string_of_integer() {
        let qty = Quantity::new(dec!(2.0)).unwrap();
        assert_eq!(qty.to_wire_string(), "2");
    }

    #[test]
    fn parse_from_str() {
        let qty: Quantity = "0.001".parse().unwrap();
        assert_eq!(qty.get(), dec!(0.001));
        assert!("zero".parse::<Quantity>().is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<Quantity, _> = serde_json::from_str("\"1.25\"");
        assert!(ok.is_ok());
        let bad: Result<Quantity, _> = serde_json::from_str("\"0\"");
        assert!(bad.is_err());
    }
}
