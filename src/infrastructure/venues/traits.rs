//! # Exchange Adapter Trait
//!
//! The port every venue implements.
//!
//! An adapter translates the normalized domain model to and from one
//! venue's REST protocol: request signing, quote payloads, and the venue's
//! private order-status vocabulary.
//!
//! # Contract
//!
//! - [`ExchangeAdapter::fetch_quote`] fails with
//!   [`VenueError::QuoteUnavailable`](crate::infrastructure::venues::error::VenueError::QuoteUnavailable)
//!   when the venue has no market for the pair, and with another
//!   `VenueError` for transport or protocol failure.
//! - [`ExchangeAdapter::place_order`] returns a `Failed` order when the
//!   venue rejects it, and an error only when the venue could not be
//!   talked to.
//! - Unrecognized venue statuses map to `Failed`.

use crate::domain::entities::{MarketSnapshot, Order};
use crate::domain::value_objects::{TradingPair, VenueId};
use crate::infrastructure::venues::error::VenueResult;
use async_trait::async_trait;
use std::fmt;

/// A single exchange venue.
///
/// Adapters hold only immutable credentials and an HTTP client, so they are
/// shared across tasks behind `Arc<dyn ExchangeAdapter>`.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync + fmt::Debug {
    /// Returns the venue identifier.
    fn venue_id(&self) -> &VenueId;

    /// Returns the per-request deadline in milliseconds.
    fn timeout_ms(&self) -> u64;

    /// Fetches the current best bid and ask for `pair`.
    ///
    /// # Errors
    ///
    /// - `VenueError::QuoteUnavailable` if the venue does not list the pair
    /// - Any other `VenueError` on transport or payload failure
    async fn fetch_quote(&self, pair: &TradingPair) -> VenueResult<MarketSnapshot>;

    /// Submits `order` as an immediate market order.
    ///
    /// Returns the order in its new state, carrying the venue order id when
    /// the venue assigned one.
    ///
    /// # Errors
    ///
    /// Returns `VenueError` if the venue could not be reached or answered
    /// with something other than an acceptance or a rejection.
    async fn place_order(&self, order: &Order) -> VenueResult<Order>;
}
