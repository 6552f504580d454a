//! # Crypto Order Router
//!
//! Best-execution routing of market orders across centralized crypto
//! exchanges (Binance, OKX).
//!
//! One routing call queries every configured venue concurrently, discards
//! venues that fail or quote a one-sided or crossed book, picks the venue
//! with the best executable price for the order's side, and places the
//! order there. The call always yields an [`OrderResult`], never an error.
//!
//! ## Architecture
//!
//! This crate follows Domain-Driven Design with a layered architecture:
//!
//! - **Domain Layer** (`domain`): value objects, the `Order` state machine, and the best-execution selector
//! - **Application Layer** (`application`): the routing use case, quote aggregation, and DTOs
//! - **Infrastructure Layer** (`infrastructure`): signed REST adapters per venue, registry, and factory
//! - **Configuration** (`config`): TOML file plus environment overrides
//!
//! ## Example
//!
//! ```rust,ignore
//! use crypto_order_router::application::{PlaceMarketOrderUseCase, PlaceOrderRequest};
//! use crypto_order_router::config::AppConfig;
//! use crypto_order_router::infrastructure::venues::build_registry;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let config = AppConfig::load()?;
//! let registry = Arc::new(build_registry(&config, &tracing::Span::none()).await?);
//! let router = PlaceMarketOrderUseCase::new(registry).with_routing_config(&config.routing);
//!
//! let result = router
//!     .execute(&PlaceOrderRequest::new("BTC", "USDT", "buy", dec!(0.01)))
//!     .await;
//! println!("{result}");
//! ```
//!
//! [`OrderResult`]: application::OrderResult

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
