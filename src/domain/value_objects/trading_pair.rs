//! # Trading Pair Value Object
//!
//! Trading pair representation.
//!
//! This module provides the [`TradingPair`] type: an immutable pair of asset
//! codes (base, quote). Its canonical string form is the concatenation
//! `BASEQUOTE` (e.g. `BTCUSDT`), which is also the Binance symbol format.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::value_objects::trading_pair::TradingPair;
//!
//! let pair = TradingPair::new("btc", "usdt").unwrap();
//! assert_eq!(pair.to_string(), "BTCUSDT");
//! assert_eq!(pair.joined("-"), "BTC-USDT");
//!
//! let parsed: TradingPair = "ETH/USDC".parse().unwrap();
//! assert_eq!(parsed.base(), "ETH");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for trading pair parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradingPairError {
    /// Base asset is empty.
    #[error("base asset cannot be empty")]
    EmptyBaseAsset,

    /// Quote asset is empty.
    #[error("quote asset cannot be empty")]
    EmptyQuoteAsset,

    /// Asset code contains invalid characters.
    #[error("asset code contains invalid characters: '{0}'")]
    InvalidCharacters(String),

    /// String could not be split into base and quote.
    #[error("invalid trading pair format: expected BASE/QUOTE, BASE-QUOTE or a known quote suffix, got '{0}'")]
    InvalidFormat(String),
}

/// A validated trading pair.
///
/// Both asset codes are stored in uppercase.
///
/// # Invariants
///
/// - Base and quote are non-empty
/// - Only ASCII alphanumeric characters are allowed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TradingPair {
    base: String,
    quote: String,
}

impl TradingPair {
    /// Separators accepted when parsing.
    pub const SEPARATORS: [char; 3] = ['/', '-', '_'];

    /// Quote assets recognised when splitting a concatenated symbol such as
    /// `BTCUSDT`. Longer codes are tried first.
    pub const KNOWN_QUOTES: [&'static str; 9] = [
        "FDUSD", "USDT", "USDC", "BUSD", "EUR", "USD", "BTC", "ETH", "BNB",
    ];

    /// Creates a new trading pair from base and quote asset codes.
    ///
    /// # Errors
    ///
    /// Returns `TradingPairError` if either code is empty or contains
    /// non-alphanumeric characters.
    pub fn new(base: impl AsRef<str>, quote: impl AsRef<str>) -> Result<Self, TradingPairError> {
        let base = Self::normalize(base.as_ref(), TradingPairError::EmptyBaseAsset)?;
        let quote = Self::normalize(quote.as_ref(), TradingPairError::EmptyQuoteAsset)?;
        Ok(Self { base, quote })
    }

    fn normalize(code: &str, empty: TradingPairError) -> Result<String, TradingPairError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(empty);
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TradingPairError::InvalidCharacters(code.to_string()));
        }
        Ok(code.to_ascii_uppercase())
    }

    /// Splits a concatenated symbol (`BTCUSDT`) using [`Self::KNOWN_QUOTES`].
    ///
    /// # Errors
    ///
    /// Returns `TradingPairError::InvalidFormat` if no known quote asset is a
    /// proper suffix of the symbol.
    pub fn from_concatenated(symbol: &str) -> Result<Self, TradingPairError> {
        let upper = symbol.trim().to_ascii_uppercase();
        Self::KNOWN_QUOTES
            .iter()
            .filter(|quote| upper.len() > quote.len())
            .find_map(|quote| upper.strip_suffix(quote).map(|base| (base, *quote)))
            .ok_or_else(|| TradingPairError::InvalidFormat(symbol.to_string()))
            .and_then(|(base, quote)| Self::new(base, quote))
    }

    /// Returns the base asset code.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the quote asset code.
    #[inline]
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Joins base and quote with the given separator.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        format!("{}{}{}", self.base, separator, self.quote)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = TradingPairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once(Self::SEPARATORS) {
            Some((base, quote)) => Self::new(base, quote),
            None => Self::from_concatenated(trimmed),
        }
    }
}
