//! # Infrastructure Layer
//!
//! External adapters and implementations of domain ports.
//!
//! ## Venues
//!
//! REST adapters for the exchanges the router can trade on, plus the
//! registry and factory that wire them from configuration.

pub mod venues;
