//! # Order Aggregate
//!
//! A single market order routed to one venue.
//!
//! # Status State Machine
//!
//! ```text
//! Pending ──fill──→ Filled
//!    │
//!    └────fail────→ Failed
//! ```
//!
//! Transitions consume the order and return a new value, so the router
//! always holds exactly one current version. Leaving a terminal state
//! fails with [`DomainError::InvalidStateTransition`].
//!
//! # Examples
//!
//! ```
//! use crypto_order_router::domain::entities::order::Order;
//! use crypto_order_router::domain::value_objects::{
//!     OrderSide, OrderStatus, Quantity, TradingPair, VenueId,
//! };
//! use rust_decimal::Decimal;
//!
//! let order = Order::new(
//!     TradingPair::new("BTC", "USDT").unwrap(),
//!     OrderSide::Buy,
//!     Quantity::new(Decimal::new(1, 2)).unwrap(),
//! );
//! assert!(order.is_pending());
//!
//! let order = order
//!     .routed_to(VenueId::new("binance"))
//!     .unwrap()
//!     .fill(Some(Decimal::from(50_000)))
//!     .unwrap();
//! assert_eq!(order.status(), OrderStatus::Filled);
//! assert!(order.fail("too late").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{
    OrderId, OrderSide, OrderStatus, Quantity, TradingPair, VenueId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A market order and its lifecycle.
///
/// # Invariants
///
/// - Pair, side and quantity never change after construction
/// - `Filled` and `Failed` are terminal
/// - A failed order always carries an error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Locally generated identifier.
    id: OrderId,
    /// Identifier assigned by the venue, once it accepted the order.
    venue_order_id: Option<String>,
    pair: TradingPair,
    side: OrderSide,
    quantity: Quantity,
    status: OrderStatus,
    /// Venue the order was routed to.
    venue_id: Option<VenueId>,
    /// Average execution price reported by the venue.
    filled_price: Option<Decimal>,
    /// Why the order failed.
    error: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Order {
    /// Creates a new pending order with a fresh identifier.
    #[must_use]
    pub fn new(pair: TradingPair, side: OrderSide, quantity: Quantity) -> Self {
        let now = Timestamp::now();
        Self {
            id: OrderId::new_v4(),
            venue_order_id: None,
            pair,
            side,
            quantity,
            status: OrderStatus::Pending,
            venue_id: None,
            filled_price: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ensure_pending(&self, target: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn transition_to(mut self, target: OrderStatus) -> DomainResult<Self> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidStateTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(self)
    }

    // ========== Transitions ==========

    /// Assigns the venue selected for execution.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the order is terminal.
    pub fn routed_to(mut self, venue_id: VenueId) -> DomainResult<Self> {
        self.ensure_pending(OrderStatus::Pending)?;
        self.venue_id = Some(venue_id);
        self.updated_at = Timestamp::now();
        Ok(self)
    }

    /// Records the identifier the venue assigned to this order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the order is terminal.
    pub fn with_venue_order_id(mut self, venue_order_id: impl Into<String>) -> DomainResult<Self> {
        self.ensure_pending(OrderStatus::Pending)?;
        self.venue_order_id = Some(venue_order_id.into());
        Ok(self)
    }

    /// Marks the order filled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the order is pending.
    pub fn fill(self, filled_price: Option<Decimal>) -> DomainResult<Self> {
        let mut order = self.transition_to(OrderStatus::Filled)?;
        order.filled_price = filled_price;
        Ok(order)
    }

    /// Marks the order failed with a human-readable reason.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` unless the order is pending.
    pub fn fail(self, reason: impl Into<String>) -> DomainResult<Self> {
        let mut order = self.transition_to(OrderStatus::Failed)?;
        order.error = Some(reason.into());
        Ok(order)
    }

    /// Applies a status reported by a venue.
    ///
    /// `Pending` leaves a pending order unchanged, `Filled` records
    /// `filled_price`, and `Failed` records `reason`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the order is terminal.
    pub fn with_status(
        self,
        status: OrderStatus,
        filled_price: Option<Decimal>,
        reason: impl Into<String>,
    ) -> DomainResult<Self> {
        match status {
            OrderStatus::Pending => {
                self.ensure_pending(status)?;
                Ok(self)
            }
            OrderStatus::Filled => self.fill(filled_price),
            OrderStatus::Failed => self.fail(reason),
        }
    }

    // ========== Accessors ==========

    /// Returns the local order ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the venue-assigned order ID, if any.
    #[inline]
    #[must_use]
    pub fn venue_order_id(&self) -> Option<&str> {
        self.venue_order_id.as_deref()
    }

    /// Returns the trading pair.
    #[inline]
    #[must_use]
    pub fn pair(&self) -> &TradingPair {
        &self.pair
    }

    /// Returns the order side.
    #[inline]
    #[must_use]
    pub fn side(&self) -> OrderSide {
        self.side
    }

    /// Returns the order quantity.
    #[inline]
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the current status.
    #[inline]
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the venue the order was routed to, if any.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> Option<&VenueId> {
        self.venue_id.as_ref()
    }

    /// Returns the filled price, if any.
    #[inline]
    #[must_use]
    pub fn filled_price(&self) -> Option<Decimal> {
        self.filled_price
    }

    /// Returns the failure reason, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns when the order was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the order last changed.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ========== Predicates ==========

    /// Returns true if the order is pending.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// Returns true if the order filled.
    #[inline]
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Returns true if the order failed.
    #[inline]
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == OrderStatus::Failed
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({} {} {} {} {})",
            self.id, self.side, self.quantity, self.pair, self.status
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pending() -> Order {
        Order::new(
            TradingPair::new("BTC", "USDT").unwrap(),
            OrderSide::Sell,
            Quantity::new(dec!(0.5)).unwrap(),
        )
    }

    #[test]
    fn new_order_is_pending_and_unrouted() {
        let order = pending();
        assert!(order.is_pending());
        assert!(order.venue_id().is_none());
        assert!(order.venue_order_id().is_none());
        assert!(order.error().is_none());
        assert_eq!(order.created_at(), order.updated_at());
    }

    #[test]
    fn fill_keeps_request_fields() {
        let order = pending();
        let id = order.id();
        let filled = order
            .routed_to(VenueId::new("okx"))
            .unwrap()
            .with_venue_order_id("312269865356374016")
            .unwrap()
            .fill(Some(dec!(49995)))
            .unwrap();

        assert!(filled.is_filled());
        assert_eq!(filled.id(), id);
        assert_eq!(filled.side(), OrderSide::Sell);
        assert_eq!(filled.quantity().get(), dec!(0.5));
        assert_eq!(filled.pair().to_string(), "BTCUSDT");
        assert_eq!(filled.venue_id().unwrap().as_str(), "okx");
        assert_eq!(filled.venue_order_id(), Some("312269865356374016"));
        assert_eq!(filled.filled_price(), Some(dec!(49995)));
    }

    #[test]
    fn fail_records_reason() {
        let failed = pending().fail("insufficient balance").unwrap();
        assert!(failed.is_failed());
        assert_eq!(failed.error(), Some("insufficient balance"));
    }

    #[test]
    fn terminal_states_are_final() {
        let filled = pending().fill(None).unwrap();
        assert_eq!(
            filled.clone().fail("late").unwrap_err(),
            DomainError::InvalidStateTransition {
                from: OrderStatus::Filled,
                to: OrderStatus::Failed,
            }
        );
        assert!(filled.clone().fill(None).is_err());
        assert!(filled.routed_to(VenueId::new("okx")).is_err());

        let failed = pending().fail("rejected").unwrap();
        assert!(failed.clone().fill(Some(dec!(1))).is_err());
        assert!(failed.with_venue_order_id("1").is_err());
    }

    #[test]
    fn with_status_pending_is_noop() {
        let order = pending();
        let id = order.id();
        let same = order
            .with_status(OrderStatus::Pending, Some(dec!(1)), "ignored")
            .unwrap();
        assert!(same.is_pending());
        assert_eq!(same.id(), id);
        assert!(same.filled_price().is_none());
        assert!(same.error().is_none());
    }

    #[test]
    fn with_status_maps_to_transitions() {
        let filled = pending()
            .with_status(OrderStatus::Filled, Some(dec!(2)), "unused")
            .unwrap();
        assert_eq!(filled.filled_price(), Some(dec!(2)));
        assert!(filled.error().is_none());

        let failed = pending()
            .with_status(OrderStatus::Failed, None, "venue status: CANCELED")
            .unwrap();
        assert_eq!(failed.error(), Some("venue status: CANCELED"));
    }
}
