//! # Venue Adapters
//!
//! Implementations of the [`ExchangeAdapter`] trait for centralized exchanges.
//!
//! - [`binance`]: Binance spot REST API (HMAC-SHA256 hex signatures)
//! - [`okx`]: OKX v5 REST API (HMAC-SHA256 base64 signatures, demo trading)
//!
//! [`factory`] builds adapters from configuration and [`registry`] holds
//! them in ascending venue order.

pub mod binance;
pub mod error;
pub mod factory;
pub mod http_client;
pub mod okx;
pub mod registry;
pub mod signing;
pub mod traits;
pub mod wire;


pub use error::{VenueError, VenueResult};
pub use factory::{VenueKind, build_adapter, build_registry};
pub use registry::VenueRegistry;
pub use traits::ExchangeAdapter;
