//! Decimal fields as venues send them: JSON strings, sometimes empty.

use crate::domain::value_objects::Price;
use crate::infrastructure::venues::error::{VenueError, VenueResult};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses an optional decimal string. Empty means absent.
///
/// # Errors
///
/// Returns `VenueError::ProtocolError` naming `field` if the value is not a
/// decimal.
pub fn optional_decimal(field: &str, raw: Option<&str>) -> VenueResult<Option<Decimal>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Decimal::from_str(value)
            .map(Some)
            .map_err(|_| VenueError::protocol_error(format!("{field} is not a decimal: '{value}'"))),
    }
}

/// Parses one side of a book. Empty means the side is absent.
///
/// # Errors
///
/// Returns `VenueError::ProtocolError` if the value is not a non-negative
/// decimal.
pub fn book_price(field: &str, raw: Option<&str>) -> VenueResult<Option<Price>> {
    optional_decimal(field, raw)?
        .map(|amount| {
            Price::observed_now(amount)
                .map_err(|e| VenueError::protocol_error(format!("{field}: {e}")))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_and_missing_are_absent() {
        assert_eq!(optional_decimal("bidPx", None).unwrap(), None);
        assert_eq!(optional_decimal("bidPx", Some("")).unwrap(), None);
        assert!(book_price("askPx", Some(" ")).unwrap().is_none());
    }

    #[test]
    fn venue_formatting_is_accepted() {
        assert_eq!(
            optional_decimal("bidPrice", Some("49990.01000000")).unwrap(),
            Some(dec!(49990.01))
        );
        let zero = book_price("bidPrice", Some("0.00000000")).unwrap().unwrap();
        assert!(!zero.is_positive());
    }

    #[test]
    fn garbage_is_protocol_error() {
        let err = optional_decimal("avgPx", Some("n/a")).unwrap_err();
        assert_eq!(err.kind(), "protocol");
        assert!(err.to_string().contains("avgPx"));

        let err = book_price("askPrice", Some("-1")).unwrap_err();
        assert_eq!(err.kind(), "protocol");
    }
}
