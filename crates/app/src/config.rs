//! Application configuration loaded from environment variables.
//!
//! - `HOMESTAY_API_URL` - backend base URL (default: `http://localhost:8080/api`)
//! - `HOMESTAY_TIMEOUT_SECS` - request timeout in seconds (default: 10)
//! - `HOMESTAY_DATA_DIR` - where the session file lives (default: `{data_dir}/homestay`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use homestay_client::ClientConfig;
use homestay_client::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const API_URL_VAR: &str = "HOMESTAY_API_URL";
pub const TIMEOUT_VAR: &str = "HOMESTAY_TIMEOUT_SECS";
pub const DATA_DIR_VAR: &str = "HOMESTAY_DATA_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
    #[error("no data directory available; set {DATA_DIR_VAR}")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = match var(API_URL_VAR) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) => {
                return Err(ConfigError::InvalidEnvVar(
                    API_URL_VAR,
                    format!("'{url}' is not an http(s) URL"),
                ));
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let timeout = match var(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidEnvVar(
                        TIMEOUT_VAR,
                        format!("'{raw}' is not a positive number of seconds"),
                    ));
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let data_dir = match var(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            api_url,
            timeout,
            data_dir,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: self.timeout,
        }
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join("homestay"))
        .ok_or(ConfigError::NoDataDir)
}
