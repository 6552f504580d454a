//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`OrderId`]: UUID-based local order identifier
//! - [`VenueId`]: String-based venue identifier
//!
//! ## Numeric Types
//!
//! - [`Price`]: Non-negative decimal amount with observation time
//! - [`Quantity`]: Strictly positive decimal quantity
//!
//! ## Trading Types
//!
//! - [`TradingPair`]: Base/quote asset pair (e.g., BTC/USDT)
//! - [`OrderSide`], [`OrderStatus`]: Order direction and lifecycle

pub mod enums;
pub mod ids;
pub mod price;
pub mod quantity;
pub mod timestamp;
pub mod trading_pair;

pub use enums::{OrderSide, OrderStatus, ParseEnumError};
pub use ids::{OrderId, VenueId};
pub use price::Price;
pub use quantity::Quantity;
pub use timestamp::Timestamp;
pub use trading_pair::{TradingPair, TradingPairError};
