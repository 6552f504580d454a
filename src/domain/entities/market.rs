//! # Market Snapshot
//!
//! Point-in-time top of book for one trading pair on one venue.
//!
//! A [`MarketSnapshot`] is a value object: it has no identity beyond its
//! fields and is never updated after construction. A snapshot is only
//! eligible for best-execution selection when [`MarketSnapshot::is_valid`]
//! holds.
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::entities::market::MarketSnapshot;
//! use crypto_order_router::domain::value_objects::{Price, TradingPair, VenueId};
//! use rust_decimal::Decimal;
//!
//! let pair = TradingPair::new("BTC", "USDT").unwrap();
//! let snapshot = MarketSnapshot::new(
//!     VenueId::new("binance"),
//!     pair,
//!     Some(Price::observed_now(Decimal::from(49_990)).unwrap()),
//!     Some(Price::observed_now(Decimal::from(50_000)).unwrap()),
//! );
//! assert!(snapshot.is_valid());
//! ```

use crate::domain::value_objects::{OrderSide, Price, TradingPair, VenueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Best bid and best ask observed on a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    venue_id: VenueId,
    pair: TradingPair,
    best_bid: Option<Price>,
    best_ask: Option<Price>,
}

impl MarketSnapshot {
    /// Creates a new snapshot. Either side may be absent.
    #[must_use]
    pub fn new(
        venue_id: VenueId,
        pair: TradingPair,
        best_bid: Option<Price>,
        best_ask: Option<Price>,
    ) -> Self {
        Self {
            venue_id,
            pair,
            best_bid,
            best_ask,
        }
    }

    /// Returns the venue that produced this snapshot.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Returns the quoted trading pair.
    #[inline]
    #[must_use]
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    /// Returns the best bid, if the venue reported one.
    #[inline]
    #[must_use]
    pub fn best_bid(&self) -> Option<Price> {
        self.best_bid
    }

    /// Returns the best ask, if the venue reported one.
    #[inline]
    #[must_use]
    pub fn best_ask(&self) -> Option<Price> {
        self.best_ask
    }

    /// Returns true if the book can be executed against.
    ///
    /// Both sides must be present, the bid must be positive, and the book
    /// must not be crossed or locked (`bid < ask`).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => bid.is_positive() && bid.amount() < ask.amount(),
            _ => false,
        }
    }

    /// Returns the price an order on `side` would execute against:
    /// the ask for a buy, the bid for a sell.
    #[must_use]
    pub fn executable_price(&self, side: OrderSide) -> Option<Price> {
        match side {
            OrderSide::Buy => self.best_ask,
            OrderSide::Sell => self.best_bid,
        }
    }
}

impl fmt::Display for MarketSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |p: Option<Price>| p.map_or_else(|| "-".to_string(), |p| p.to_string());
        write!(
            f,
            "{} {} bid={} ask={}",
            self.venue_id,
            self.pair,
            side(self.best_bid),
            side(self.best_ask)
        )
    }
}
