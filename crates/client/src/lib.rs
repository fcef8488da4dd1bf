//! `homestay-client`: typed wrappers over the marketplace REST backend.
//!
//! Every endpoint answers with the `{success, data, message}` envelope. This
//! crate decodes it, maps HTTP failures to [`ApiError`], and injects the
//! bearer token when one is set. It does not own the session; callers decide
//! what a 401 means for it.

pub mod client;
pub mod dto;
pub mod envelope;
pub mod error;
pub mod services;

pub use client::{ApiClient, ClientConfig};
pub use envelope::{ApiResponse, Page, PageRequest};
pub use error::ApiError;
