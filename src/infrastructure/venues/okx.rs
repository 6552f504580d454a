//! # OKX Adapter
//!
//! Adapter for the OKX v5 REST API.
//!
//! This module provides the [`OkxAdapter`] which implements the
//! [`ExchangeAdapter`] trait for OKX, including its demo-trading mode.
//!
//! # Protocol
//!
//! - Quote: `GET /api/v5/market/ticker?instId=BTC-USDT` (public)
//! - Order: `POST /api/v5/trade/order` with a JSON body
//! - Details: `GET /api/v5/trade/order?instId=..&ordId=..`
//! - Signing: `base64(HMAC-SHA256(secret, ts + METHOD + path[?query] + body))`
//!   sent in `OK-ACCESS-SIGN`, with `ts` as ISO-8601 milliseconds in UTC
//!
//! The order endpoint only acknowledges the order, so placement waits a
//! fixed delay and reads the order details once to learn its state.

use crate::domain::entities::{MarketSnapshot, Order};
use crate::domain::value_objects::timestamp::Timestamp;
use crate::domain::value_objects::{OrderStatus, TradingPair, VenueId};
use crate::infrastructure::venues::error::{VenueError, VenueResult};
use crate::infrastructure::venues::http_client::{HttpClient, header_value};
use crate::infrastructure::venues::signing::hmac_sha256_base64;
use crate::infrastructure::venues::traits::ExchangeAdapter;
use crate::infrastructure::venues::wire::{book_price, optional_decimal};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::Span;

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.okx.com";

/// Default venue identifier.
pub const VENUE_ID: &str = "okx";

/// Default request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default wait between order creation and the details read.
const DEFAULT_ORDER_STATUS_DELAY_MS: u64 = 500;

const TICKER_PATH: &str = "/api/v5/market/ticker";
const ORDER_PATH: &str = "/api/v5/trade/order";

// Header names are case-insensitive on the wire; `HeaderName` requires lowercase.
const ACCESS_KEY: &str = "ok-access-key";
const ACCESS_SIGN: &str = "ok-access-sign";
const ACCESS_TIMESTAMP: &str = "ok-access-timestamp";
const ACCESS_PASSPHRASE: &str = "ok-access-passphrase";
const SIMULATED_TRADING: &str = "x-simulated-trading";

/// Configuration for the OKX adapter.
#[derive(Clone)]
pub struct OkxConfig {
    venue_id: VenueId,
    api_key: String,
    api_secret: String,
    api_passphrase: String,
    base_url: String,
    simulated: bool,
    timeout_ms: u64,
    order_status_delay_ms: u64,
}

impl OkxConfig {
    /// Creates a configuration for demo trading with default endpoint.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        api_passphrase: impl Into<String>,
    ) -> Self {
        Self {
            venue_id: VenueId::new(VENUE_ID),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_passphrase: api_passphrase.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            simulated: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            order_status_delay_ms: DEFAULT_ORDER_STATUS_DELAY_MS,
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

    /// Enables or disables demo trading.
    #[must_use]
    pub fn with_simulated(mut self, simulated: bool) -> Self {
        self.simulated = simulated;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the wait before the order details read.
    #[must_use]
    pub fn with_order_status_delay_ms(mut self, delay_ms: u64) -> Self {
        self.order_status_delay_ms = delay_ms;
        self
    }

    /// Returns the venue identifier.
    #[inline]
    #[must_use]
    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    /// Returns the REST base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true for demo trading.
    #[inline]
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        self.simulated
    }

    /// Returns the request timeout.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Returns the wait before the order details read.
    #[inline]
    #[must_use]
    pub fn order_status_delay_ms(&self) -> u64 {
        self.order_status_delay_ms
    }
}

impl fmt::Debug for OkxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OkxConfig")
            .field("venue_id", &self.venue_id)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("api_passphrase", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("simulated", &self.simulated)
            .field("timeout_ms", &self.timeout_ms)
            .field("order_status_delay_ms", &self.order_status_delay_ms)
            .finish()
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Every OKX response is wrapped in `{"code","msg","data":[...]}`.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Envelope<T> {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    fn is_ok(&self) -> bool {
        self.code == "0"
    }

    fn message(&self) -> &str {
        if self.msg.is_empty() {
            &self.code
        } else {
            &self.msg
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker {
    bid_px: Option<String>,
    ask_px: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderBody<'a> {
    inst_id: &'a str,
    td_mode: &'static str,
    side: &'static str,
    ord_type: &'static str,
    sz: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderAck {
    #[serde(default)]
    ord_id: String,
    #[serde(default)]
    s_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDetails {
    #[serde(default)]
    state: String,
    #[serde(default)]
    avg_px: Option<String>,
}

/// Maps an OKX order state onto the normalized status.
///
/// Unknown states fail closed.
#[must_use]
pub fn map_order_state(state: &str) -> OrderStatus {
    match state {
        "live" | "partially_filled" => OrderStatus::Pending,
        "filled" => OrderStatus::Filled,
        "canceled" | "mmp_canceled" => OrderStatus::Failed,
        _ => OrderStatus::Failed,
    }
}

/// Returns the OKX instrument id (`BTC-USDT`) for a pair.
#[must_use]
pub fn inst_id(pair: &TradingPair) -> String {
    pair.joined("-")
}

fn envelope_message(body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .map(|e| e.message().to_string())
        .unwrap_or_else(|_| body.to_string())
}

// ============================================================================
// Adapter
// ============================================================================

/// OKX exchange adapter.
pub struct OkxAdapter {
    config: OkxConfig,
    http_client: HttpClient,
    span: Span,
}

impl OkxAdapter {
    /// Creates a new OKX adapter.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::InternalError` if the HTTP client cannot be created.
    pub fn new(config: OkxConfig) -> VenueResult<Self> {
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

    /// Computes `OK-ACCESS-SIGN` for a request.
    ///
    /// `request_path` includes the query string for GET requests; `body` is
    /// the exact JSON sent for POST requests and empty otherwise.
    ///
    /// # Errors
    ///
    /// Returns `VenueError::InternalError` if signing fails.
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> VenueResult<String> {
        let prehash = format!("{timestamp}{method}{request_path}{body}");
        hmac_sha256_base64(&self.config.api_secret, &prehash)
    }

    fn signed_headers(&self, method: &str, request_path: &str, body: &str) -> VenueResult<HeaderMap> {
        let timestamp = Timestamp::now().to_iso_millis();
        let signature = self.sign(&timestamp, method, request_path, body)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_KEY, header_value(ACCESS_KEY, &self.config.api_key)?);
        headers.insert(ACCESS_SIGN, header_value(ACCESS_SIGN, &signature)?);
        headers.insert(ACCESS_TIMESTAMP, header_value(ACCESS_TIMESTAMP, &timestamp)?);
        headers.insert(
            ACCESS_PASSPHRASE,
            header_value(ACCESS_PASSPHRASE, &self.config.api_passphrase)?,
        );
        if self.config.simulated {
            headers.insert(SIMULATED_TRADING, header_value(SIMULATED_TRADING, "1")?);
        }
        Ok(headers)
    }

    /// Reads the authoritative state of a placed order.
    async fn order_details(&self, inst_id: &str, ord_id: &str) -> VenueResult<OrderDetails> {
        let request_path = format!("{ORDER_PATH}?instId={inst_id}&ordId={ord_id}");
        let headers = self.signed_headers("GET", &request_path, "")?;

        let response = self.http_client.get(&request_path, headers).await?;
        tracing::debug!(
            parent: &self.span,
            status = response.status().as_u16(),
            body = response.body(),
            "order details response"
        );
        if !response.is_success() {
            return Err(response.into_error());
        }

        let envelope: Envelope<OrderDetails> = response.json()?;
        if !envelope.is_ok() {
            return Err(VenueError::protocol_error(format!(
                "failed to get order details: {}",
                envelope.message()
            )));
        }
        envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| VenueError::protocol_error(format!("no details for order {ord_id}")))
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

impl fmt::Debug for OkxAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OkxAdapter")
            .field("venue_id", self.config.venue_id())
            .field("base_url", &self.config.base_url())
            .field("simulated", &self.config.is_simulated())
            .finish()
    }
}

#[async_trait]
impl ExchangeAdapter for OkxAdapter {
    fn venue_id(&self) -> &VenueId {
        self.config.venue_id()
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout_ms()
    }

    async fn fetch_quote(&self, pair: &TradingPair) -> VenueResult<MarketSnapshot> {
        let inst_id = inst_id(pair);
        let path = format!("{TICKER_PATH}?instId={inst_id}");
        tracing::debug!(parent: &self.span, venue = %self.venue_id(), %inst_id, "fetching ticker");

        let response = self.http_client.get(&path, HeaderMap::new()).await?;
        tracing::debug!(
            parent: &self.span,
            status = response.status().as_u16(),
            body = response.body(),
            "ticker response"
        );
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(VenueError::quote_unavailable(format!(
                "market {inst_id} not found: {}",
                envelope_message(response.body())
            )));
        }
        if !response.is_success() {
            return Err(response.into_error());
        }

        let envelope: Envelope<Ticker> = response.json()?;
        if !envelope.is_ok() {
            return Err(VenueError::quote_unavailable(format!(
                "market {inst_id} not found: {}",
                envelope.message()
            )));
        }
        let Some(ticker) = envelope.data.into_iter().next() else {
            return Err(VenueError::quote_unavailable(format!(
                "market {inst_id} not found: empty ticker"
            )));
        };

        Ok(MarketSnapshot::new(
            self.venue_id().clone(),
            pair.clone(),
            book_price("bidPx", ticker.bid_px.as_deref())?,
            book_price("askPx", ticker.ask_px.as_deref())?,
        ))
    }

    async fn place_order(&self, order: &Order) -> VenueResult<Order> {
        let order = self.ensure_routed_here(order)?;
        let inst_id = inst_id(order.pair());
        let body = serde_json::to_string(&PlaceOrderBody {
            inst_id: &inst_id,
            td_mode: "cash",
            side: order.side().as_str(),
            ord_type: "market",
            sz: order.quantity().to_wire_string(),
        })
        .map_err(|e| VenueError::internal_error(format!("failed to encode order: {e}")))?;
        let headers = self.signed_headers("POST", ORDER_PATH, &body)?;

        tracing::debug!(parent: &self.span, venue = %self.venue_id(), order_id = %order.id(), %body, "submitting market order");
        let response = self.http_client.post_json(ORDER_PATH, body, headers).await?;
        tracing::debug!(
            parent: &self.span,
            status = response.status().as_u16(),
            body = response.body(),
            "order response"
        );

        if response.status() == StatusCode::BAD_REQUEST {
            let message = envelope_message(response.body());
            tracing::info!(parent: &self.span, venue = %self.venue_id(), %message, "order rejected");
            return Ok(order.fail(format!("OKX rejected order: {message}"))?);
        }
        if !response.is_success() {
            return Err(response.into_error());
        }

        let envelope: Envelope<PlaceOrderAck> = response.json()?;
        let ack = envelope.data.first();
        if !envelope.is_ok() {
            let message = ack
                .and_then(|a| a.s_msg.as_deref())
                .filter(|m| !m.is_empty())
                .unwrap_or(envelope.message())
                .to_string();
            tracing::info!(parent: &self.span, venue = %self.venue_id(), %message, "order rejected");
            return Ok(order.fail(format!("OKX rejected order: {message}"))?);
        }
        let Some(ack) = ack.filter(|a| !a.ord_id.is_empty()) else {
            return Err(VenueError::protocol_error("order acknowledged without ordId"));
        };
        let ord_id = ack.ord_id.clone();

        tokio::time::sleep(Duration::from_millis(self.config.order_status_delay_ms)).await;
        let details = self.order_details(&inst_id, &ord_id).await?;
        let status = map_order_state(&details.state);
        let filled_price = optional_decimal("avgPx", details.avg_px.as_deref())?;

        Ok(order.with_venue_order_id(ord_id)?.with_status(
            status,
            filled_price,
            format!("OKX order state {}", details.state),
        )?)
    }
}
