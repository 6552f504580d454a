//! # Domain Entities
//!
//! ## Aggregates
//!
//! - [`Order`]: Market order with a one-way status state machine
//!
//! ## Value Entities
//!
//! - [`MarketSnapshot`]: Best bid/ask observed on one venue

pub mod market;
pub mod order;

pub use market::MarketSnapshot;
pub use order::Order;
