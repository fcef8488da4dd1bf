//! `homestay-auth`: client-side identity, token claims, and the
//! session store with its durable mirror.
//!
//! This crate is intentionally decoupled from HTTP. Token decoding here is
//! local and unverified; signature checks belong to the backend.

pub mod claims;
pub mod profile;
pub mod roles;
pub mod session;
pub mod storage;

pub use claims::{TokenClaims, TokenDecodeError, TokenValidationError, decode_claims, identity_from_token, validate_claims};
pub use profile::UserProfile;
pub use roles::Role;
pub use session::{SessionFlags, SessionSnapshot, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
