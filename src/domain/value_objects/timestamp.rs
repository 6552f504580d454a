//! # Timestamp Value Object
//!
//! UTC timestamp with millisecond helpers used by venue protocols.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC point in time.
///
/// # Examples
///
/// ```
/// use crypto_order_router::domain::value_objects::timestamp::Timestamp;
///
/// let ts = Timestamp::from_millis(1_597_026_383_085).unwrap();
/// assert_eq!(ts.to_iso_millis(), "2020-08-10T02:26:23.085Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from Unix epoch milliseconds.
    ///
    /// Returns `None` when the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns Unix epoch milliseconds.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Formats as ISO-8601 with millisecond precision and a `Z` suffix.
    #[must_use]
    pub fn to_iso_millis(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_millis())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn iso_millis_keeps_three_fraction_digits() {
        let ts = Timestamp::from_millis(1_700_000_000_000).unwrap();
        assert_eq!(ts.to_iso_millis(), "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn millis_roundtrip() {
        let ts = Timestamp::from_millis(1_499_827_319_559).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_499_827_319_559);
    }

    #[test]
    fn now_is_monotonic_enough() {
        let a = Timestamp::now();
        let b = Timestamp::now();
        assert!(b >= a);
    }
}
