//! # Binance Adapter
//!
//! Adapter for the Binance spot REST API.
//!
//! This module provides the [`BinanceAdapter`] which implements the
//! [`ExchangeAdapter`] trait for Binance (and the Binance spot testnet).
//!
//! # Protocol
//!
//! - Quote: `GET /api/v3/ticker/bookTicker?symbol=BTCUSDT`
//! - Order: `POST /api/v3/order` with a form body signed by appending
//!   `&signature=<hex HMAC-SHA256 of the preceding body>`
//! - API key travels in the `X-MBX-APIKEY` header
//!
//! The order endpoint answers with the final status, so no follow-up read
//! is needed.
//!
//! # Examples
//!
//! ```ignore
//! use crypto_order_router::infrastructure::venues::binance::{BinanceAdapter, BinanceConfig};
//!
//! let config = BinanceConfig::new("api-key", "api-secret")
//!     .with_base_url("https://testnet.binance.vision");
//! let adapter = BinanceAdapter::new(config)?;
//! ```

use crate::domain::entities::{MarketSnapshot, Order};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{OrderStatus, TradingPair, VenueId};
use crate::infrastructure::venues::error::{VenueError, VenueResult};
use crate::infrastructure::venues::http_client::{HttpClient, header_value};
use crate::infrastructure::venues::signing::hmac_sha256_hex;
use crate::infrastructure::venues::traits::ExchangeAdapter;
use crate::infrastructure::venues::wire::{book_price, optional_decimal};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use tracing::Span;

/// Default REST endpoint (spot testnet).
pub const DEFAULT_BASE_URL: &str = "https://testnet.binance.vision";

/// Default venue identifier.
pub const VENUE_ID: &str = "binance";

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const BOOK_TICKER_PATH: &str = "/api/v3/ticker/bookTicker";
const ORDER_PATH: &str = "/api/v3/order";
const API_KEY_HEADER: &str = "x-mbx-apikey";

/// Configuration for the Binance adapter.
#[derive(Clone)]
pub struct BinanceConfig {
    venue_id: VenueId,
    api_key: String,
    api_secret: String,
    base_url: String,
    timeout_ms: u64,
}

impl BinanceConfig {
    /// Creates a configuration with default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            venue_id: VenueId::new(VENUE_ID),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the venue identifier.
    #[must_use]
    pub fn with_venue_id(mut self, venue_id: impl Into<String>) -> Self {
        self.venue_id = VenueId::new(venue_id);
        self
    }

    /// Sets the REST base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the venue identifier.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Returns the API key.
    #[inline]
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the REST base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }
}

impl fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("venue_id", &self.venue_id)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    bid_price: Option<String>,
    ask_price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    msg: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponse {
    order_id: u64,
    status: String,
    #[serde(default)]
    fills: Vec<Fill>,
}

#[derive(Debug, Deserialize)]
struct Fill {
    price: String,
    #[serde(default)]
    qty: Option<String>,
}

/// Maps a Binance order status onto the normalized status.
///
/// Unknown statuses fail closed.
#[must_use]
pub fn map_order_status(status: &str) -> OrderStatus {
    match status {
        "NEW" | "PENDING_NEW" | "PARTIALLY_FILLED" | "PENDING_CANCEL" => OrderStatus::Pending,
        "FILLED" => OrderStatus::Filled,
        "CANCELED" | "REJECTED" | "EXPIRED" | "EXPIRED_IN_MATCH" => OrderStatus::Failed,
        _ => OrderStatus::Failed,
    }
}

/// Volume-weighted average price over `fills`.
///
/// Falls back to the first fill price when quantities are missing or sum
/// to zero. Yields `None` when the weighted sum overflows.
fn average_fill_price(fills: &[Fill]) -> VenueResult<Option<Decimal>> {
    let mut totals = Some((Decimal::ZERO, Decimal::ZERO));
    let mut first = None;

    for fill in fills {
        let Some(price) = optional_decimal("fills.price", Some(fill.price.as_str()))? else {
            continue;
        };
        first.get_or_insert(price);
        if let Some(qty) = optional_decimal("fills.qty", fill.qty.as_deref())? {
            totals = totals.and_then(|(notional, volume)| {
                Some((
                    notional.checked_add(price.checked_mul(qty)?)?,
                    volume.checked_add(qty)?,
                ))
            });
        }
    }

    match totals {
        None => Ok(None),
        Some((notional, volume)) if volume > Decimal::ZERO => {
            Ok(notional.checked_div(volume).map(|p| p.normalize()))
        }
        Some(_) => Ok(first),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .ok()
        .and_then(|e| e.msg)
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// Adapter
// ============================================================================

/// Binance spot exchange adapter.
pub struct BinanceAdapter {
    config: BinanceConfig,
    http_client: HttpClient,
    span: Span,
}

impl BinanceAdapter {
    /// Creates a new Binance adapter.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::InternalError` if the HTTP client cannot be created.
    pub fn new(config: BinanceConfig) -> VenueResult<Self> {
        let http_client = HttpClient::new(config.base_url(), config.timeout_ms())?;
        Ok(Self {
            config,
            http_client,
            span: Span::none(),
        })
    }

    /// Attaches the span that parents this adapter's events.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Builds the signed form body for a market order.
    ///
    /// The signature covers every byte that precedes `&signature=`.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::InternalError` if signing fails.
    pub fn signed_order_body(&self, order: &Order, timestamp_ms: i64) -> VenueResult<String> {
        let payload = format!(
            "symbol={}&side={}&type=MARKET&quantity={}&timestamp={}",
            order.pair(),
            order.side().as_str().to_ascii_uppercase(),
            order.quantity().to_wire_string(),
            timestamp_ms
        );
        let signature = hmac_sha256_hex(&self.config.api_secret, &payload)?;
        Ok(format!("{payload}&signature={signature}"))
    }

    fn ensure_routed_here(&self, order: &Order) -> VenueResult<Order> {
        match order.venue_id() {
            Some(venue_id) if venue_id != self.venue_id() => Err(VenueError::invalid_request(
                format!("order routed to {venue_id}, not {}", self.venue_id()),
            )),
            Some(_) => Ok(order.clone()),
            None => Ok(order.clone().routed_to(self.venue_id().clone())?),
        }
    }
}

impl fmt::Debug for BinanceAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceAdapter")
            .field("venue_id", self.config.venue_id())
            .field("base_url", &self.config.base_url())
            .finish()
    }
}

#[async_trait]
impl ExchangeAdapter for BinanceAdapter {
    fn venue_id(&self) -> &VenueId {
        self.config.venue_id()
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms()
    }

    async fn fetch_quote(&self, pair: &TradingPair) -> VenueResult<MarketSnapshot> {
        let symbol = pair.to_string();
        let path = format!("{BOOK_TICKER_PATH}?symbol={symbol}");
        tracing::debug!(parent: &self.span, venue = %self.venue_id(), %symbol, "fetching book ticker");

        let response = self.http_client.get(&path, HeaderMap::new()).await?;
        tracing::debug!(
            parent: &self.span,
            status = response.status().as_u16(),
            body = response.body(),
            "book ticker response"
        );

        if response.status() == StatusCode::BAD_REQUEST {
            return Err(VenueError::quote_unavailable(format!(
                "market {symbol} not found: {}",
                error_message(response.body())
            )));
        }
        if !response.is_success() {
            return Err(response.into_error());
        }

        let ticker: BookTicker = response.json()?;
        Ok(MarketSnapshot::new(
            self.venue_id().clone(),
            pair.clone(),
            book_price("bidPrice", ticker.bid_price.as_deref())?,
            book_price("askPrice", ticker.ask_price.as_deref())?,
        ))
    }

    async fn place_order(&self, order: &Order) -> VenueResult<Order> {
        let order = self.ensure_routed_here(order)?;
        let body = self.signed_order_body(&order, Timestamp::now().timestamp_millis())?;
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, header_value(API_KEY_HEADER, self.config.api_key())?);

        tracing::debug!(parent: &self.span, venue = %self.venue_id(), order_id = %order.id(), "submitting market order");
        let response = self.http_client.post_form(ORDER_PATH, body, headers).await?;
        tracing::debug!(
            parent: &self.span,
            status = response.status().as_u16(),
            body = response.body(),
            "order response"
        );

        if response.status() == StatusCode::BAD_REQUEST {
            let message = error_message(response.body());
            tracing::info!(parent: &self.span, venue = %self.venue_id(), %message, "order rejected");
            return Ok(order.fail(format!("Binance rejected order: {message}"))?);
        }
        if !response.is_success() {
            return Err(response.into_error());
        }

        let placed: OrderResponse = response.json()?;
        let status = map_order_status(&placed.status);
        let filled_price = average_fill_price(&placed.fills)?;
        if filled_price.is_none() && !placed.fills.is_empty() {
            tracing::warn!(
                parent: &self.span,
                venue = %self.venue_id(),
                order_id = placed.order_id,
                "fill price out of range, reporting order without price"
            );
        }

        Ok(order
            .with_venue_order_id(placed.order_id.to_string())?
            .with_status(
                status,
                filled_price,
                format!("Binance order status {}", placed.status),
            )?)
    }
}
