//! # Application Layer
//!
//! Use case orchestration and application services.
//!
//! This layer composes venue adapters and the best-execution selector into
//! the single routing entry point.
//!
//! ## Use Cases
//!
//! - [`PlaceMarketOrderUseCase`]: Route a market order to the best venue
//!
//! ## Services
//!
//! - [`MarketAggregator`]: Collect quotes from every venue concurrently

pub mod dto;
pub mod error;
pub mod services;
pub mod use_cases;

pub use dto::{OrderResult, PlaceOrderRequest};
pub use error::{ApplicationError, ApplicationResult};
pub use services::{AggregationReport, MarketAggregator, VenueQuoteFailure};
pub use use_cases::PlaceMarketOrderUseCase;
