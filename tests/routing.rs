//! End-to-end routing against mock Binance and OKX servers.

#![allow(clippy::unwrap_used)]

use crypto_order_router::application::{PlaceMarketOrderUseCase, PlaceOrderRequest};
use crypto_order_router::config::{AppConfig, VenueCredentials};
use crypto_order_router::domain::value_objects::OrderStatus;
use crypto_order_router::infrastructure::venues::build_registry;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::Span;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Venues {
    binance: MockServer,
    okx: MockServer,
}

impl Venues {
    async fn start() -> Self {
        Self {
            binance: MockServer::start().await,
            okx: MockServer::start().await,
        }
    }

    async fn binance_book(&self, bid: &str, ask: &str) {
        Mock::given(method("GET"))
            .and(path("/api/v3/ticker/bookTicker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "symbol": "BTCUSDT",
                "bidPrice": bid,
                "askPrice": ask
            })))
            .mount(&self.binance)
            .await;
    }

    async fn okx_book(&self, bid: &str, ask: &str) {
        Mock::given(method("GET"))
            .and(path("/api/v5/market/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "0",
                "msg": "",
                "data": [{"instId": "BTC-USDT", "bidPx": bid, "askPx": ask}]
            })))
            .mount(&self.okx)
            .await;
    }

    async fn router(&self) -> PlaceMarketOrderUseCase {
        let mut config = AppConfig::default();
        config.routing.order_status_delay_ms = 0;
        config.venues.insert(
            "binance".to_string(),
            VenueCredentials::new("bk", "bs").with_base_url(self.binance.uri()),
        );
        config.venues.insert(
            "okx".to_string(),
            VenueCredentials::new("ok", "os")
                .with_passphrase("op")
                .with_base_url(self.okx.uri()),
        );
        config.validate().unwrap();

        let registry = Arc::new(build_registry(&config, &Span::none()).await.unwrap());
        PlaceMarketOrderUseCase::new(registry).with_routing_config(&config.routing)
    }
}

fn request(side: &str) -> PlaceOrderRequest {
    PlaceOrderRequest::new("BTC", "USDT", side, dec!(0.01))
}

#[tokio::test]
async fn buy_fills_on_binance() {
    let venues = Venues::start().await;
    venues.binance_book("49990.00", "50000.00").await;
    venues.okx_book("49995", "50005").await;
    Mock::given(method("POST"))
        .and(path("/api/v3/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 9001,
            "status": "FILLED",
            "fills": [{"price": "50000.00", "qty": "0.01"}]
        })))
        .expect(1)
        .mount(&venues.binance)
        .await;

    let result = venues.router().await.execute(&request("buy")).await;

    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(result.venue_id.as_deref(), Some("binance"));
    assert_eq!(result.order_id.as_deref(), Some("9001"));
    assert_eq!(result.filled_price, Some(dec!(50000)));
    assert_eq!(result.to_string(), "Order filled on binance at 50000");
}

#[tokio::test]
async fn out_of_range_fill_price_still_reports_the_fill() {
    let venues = Venues::start().await;
    venues.binance_book("49990.00", "50000.00").await;
    venues.okx_book("49995", "50005").await;
    Mock::given(method("POST"))
        .and(path("/api/v3/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orderId": 1,
            "status": "FILLED",
            "fills": [{"price": "79228162514264337593543950335", "qty": "2"}]
        })))
        .expect(1)
        .mount(&venues.binance)
        .await;

    let result = venues.router().await.execute(&request("buy")).await;

    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(result.venue_id.as_deref(), Some("binance"));
    assert_eq!(result.order_id.as_deref(), Some("1"));
    assert_eq!(result.filled_price, None);
    assert!(result.error.is_none());
    assert_eq!(result.to_string(), "Order filled on binance");
}

#[tokio::test]
async fn sell_fills_on_okx() {
    let venues = Venues::start().await;
    venues.binance_book("49990.00", "50000.00").await;
    venues.okx_book("49995", "50005").await;
    Mock::given(method("POST"))
        .and(path("/api/v5/trade/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0",
            "data": [{"ordId": "777", "sCode": "0", "sMsg": ""}]
        })))
        .expect(1)
        .mount(&venues.okx)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v5/trade/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "0",
            "data": [{"ordId": "777", "state": "filled", "avgPx": "49995"}]
        })))
        .expect(1)
        .mount(&venues.okx)
        .await;

    let result = venues.router().await.execute(&request("sell")).await;

    assert_eq!(result.status, OrderStatus::Filled);
    assert_eq!(result.venue_id.as_deref(), Some("okx"));
    assert_eq!(result.order_id.as_deref(), Some("777"));
    assert_eq!(result.filled_price, Some(dec!(49995)));
}

#[tokio::test]
async fn unlisted_pair_on_one_venue_routes_to_the_other() {
    let venues = Venues::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/ticker/bookTicker"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -1121,
            "msg": "Invalid symbol."
        })))
        .mount(&venues.binance)
        .await;
    venues.okx_book("49995", "50005").await;
    Mock::given(method("POST"))
        .and(path("/api/v5/trade/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": "1",
            "msg": "All operations failed",
            "data": [{"ordId": "", "sCode": "51008", "sMsg": "Insufficient USDT balance"}]
        })))
        .mount(&venues.okx)
        .await;

    let result = venues.router().await.execute(&request("buy")).await;

    assert_eq!(result.status, OrderStatus::Failed);
    assert_eq!(result.venue_id.as_deref(), Some("okx"));
    assert_eq!(
        result.error.as_deref(),
        Some("OKX rejected order: Insufficient USDT balance")
    );
}

#[tokio::test]
async fn no_liquidity_anywhere_fails_cleanly() {
    let venues = Venues::start().await;
    venues.binance_book("0.00000000", "0.00000000").await;
    Mock::given(method("GET"))
        .and(path("/api/v5/market/ticker"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&venues.okx)
        .await;

    let result = venues.router().await.execute(&request("buy")).await;

    assert_eq!(result.status, OrderStatus::Failed);
    assert_eq!(result.error.as_deref(), Some("No valid prices available"));
    assert!(result.venue_id.is_none());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "failed");
    assert_eq!(json["pair"], "BTC/USDT");
}
