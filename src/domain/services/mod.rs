//! # Domain Services
//!
//! Stateless domain logic that spans several entities.
//!
//! - [`BestExecutionSelector`]: Picks the venue with the best executable price

pub mod best_execution;


pub use best_execution::BestExecutionSelector;
