//! # Domain Layer
//!
//! Core routing logic following Domain-Driven Design principles.
//!
//! This layer contains:
//! - **Entities**: The order aggregate and per-venue market snapshots
//! - **Value Objects**: Immutable types with validation (Price, Quantity, identifiers)
//! - **Errors**: Domain-specific error types
//! - **Services**: Best-execution venue selection

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
