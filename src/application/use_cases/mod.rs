//! # Use Cases
//!
//! Application use cases implementing business workflows.

pub mod place_market_order;


pub use place_market_order::PlaceMarketOrderUseCase;
