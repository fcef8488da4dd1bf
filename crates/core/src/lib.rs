//! `homestay-core`: shared primitives for the homestay client.
//!
//! This crate contains **pure** types only (no storage, no transport).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, PropertyId, UserId};
