//! `homestay-app`: wires the session store, REST client and navigator into
//! one application context, plus the `homestay` command-line front end.

pub mod config;
pub mod context;

pub use config::{AppConfig, ConfigError};
pub use context::{AppContext, AppError};
