//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`MarketAggregator`]: concurrent quote collection with per-venue isolation

pub mod market_aggregation;

pub use market_aggregation::{AggregationReport, MarketAggregator, VenueQuoteFailure};
