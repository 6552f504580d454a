//! # Order DTOs
//!
//! Data transfer objects for market order routing.
//!
//! The request keeps asset codes and side as plain strings so callers do
//! not have to build domain types; [`PlaceOrderRequest::to_domain_types`]
//! performs the conversion and its validation.

use crate::domain::entities::Order;
use crate::domain::value_objects::{OrderSide, OrderStatus, Quantity, TradingPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to route one market order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Base asset code (e.g., "BTC").
    pub base_asset: String,
    /// Quote asset code (e.g., "USDT").
    pub quote_asset: String,
    /// "buy" or "sell", case-insensitive.
    pub side: String,
    /// Quantity of the base asset.
    pub quantity: Decimal,
}

impl PlaceOrderRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(
        base_asset: impl Into<String>,
        quote_asset: impl Into<String>,
        side: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            base_asset: base_asset.into(),
            quote_asset: quote_asset.into(),
            side: side.into(),
            quantity,
        }
    }

    /// Validates the request fields.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        self.to_domain_types().map(|_| ())
    }

    /// Converts the request to domain types.
    ///
    /// # Errors
    ///
    /// Returns an error message naming the first invalid field.
    pub fn to_domain_types(&self) -> Result<(TradingPair, OrderSide, Quantity), String> {
        let pair = TradingPair::new(&self.base_asset, &self.quote_asset)
            .map_err(|e| format!("invalid pair: {e}"))?;
        let side = self
            .side
            .parse::<OrderSide>()
            .map_err(|_| format!("Side must be 'buy' or 'sell': {}", self.side))?;
        let quantity =
            Quantity::new(self.quantity).map_err(|_| "Quantity must be positive".to_string())?;
        Ok((pair, side, quantity))
    }

    /// Returns the pair as `BASE/QUOTE`, normalized to upper case.
    #[must_use]
    pub fn pair_label(&self) -> String {
        format!(
            "{}/{}",
            self.base_asset.trim().to_ascii_uppercase(),
            self.quote_asset.trim().to_ascii_uppercase()
        )
    }
}

impl fmt::Display for PlaceOrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PlaceOrderRequest {{ {} {} {} }}",
            self.pair_label(),
            self.side,
            self.quantity
        )
    }
}

/// Outcome of one routing call.
///
/// Always produced, whether the order filled, was rejected, or never
/// reached a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    /// Pair as `BASE/QUOTE`.
    pub pair: String,
    /// Order side.
    pub side: String,
    /// Requested quantity.
    pub quantity: Decimal,
    /// Venue the order was placed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_id: Option<String>,
    /// Venue-assigned order id, or the local id when the venue assigned none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Final status.
    pub status: OrderStatus,
    /// Average execution price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_price: Option<Decimal>,
    /// Failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderResult {
    /// Builds a failed result that never reached a venue.
    #[must_use]
    pub fn failed(request: &PlaceOrderRequest, error: impl fmt::Display) -> Self {
        Self {
            pair: request.pair_label(),
            side: request.side.trim().to_ascii_lowercase(),
            quantity: request.quantity,
            venue_id: None,
            order_id: None,
            status: OrderStatus::Failed,
            filled_price: None,
            error: Some(error.to_string()),
        }
    }

    /// Builds a result from an order returned by a venue.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            pair: order.pair().joined("/"),
            side: order.side().to_string(),
            quantity: order.quantity().get(),
            venue_id: order.venue_id().map(|v| v.to_string()),
            order_id: Some(
                order
                    .venue_order_id()
                    .map_or_else(|| order.id().to_string(), str::to_string),
            ),
            status: order.status(),
            filled_price: order.filled_price(),
            error: order.error().map(str::to_string),
        }
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

impl fmt::Display for OrderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.venue_id) {
            (OrderStatus::Filled, Some(venue)) => match self.filled_price {
                Some(price) => write!(f, "Order filled on {venue} at {price}"),
                None => write!(f, "Order filled on {venue}"),
            },
            (OrderStatus::Failed, _) => write!(
                f,
                "Order failed: {}",
                self.error.as_deref().unwrap_or("unknown error")
            ),
            (status, venue) => write!(
                f,
                "Order {status} on {}",
                venue.as_deref().unwrap_or("no venue")
            ),
        }
    }
}
