//! # Data Transfer Objects
//!
//! DTOs for use case input/output, decoupling callers from the domain.

pub mod order_dto;

pub use order_dto::{OrderResult, PlaceOrderRequest};
