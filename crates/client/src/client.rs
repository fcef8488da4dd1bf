//! HTTP plumbing shared by every service handle.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::envelope::ApiResponse;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every endpoint path, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// REST client for the homestay backend.
///
/// Holds a copy of the session credential; the owner of the session keeps it
/// in step via [`ApiClient::set_token`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Request builder for `path` with the bearer header attached when a
    /// credential is held.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and unwrap the envelope's `data`.
    pub(crate) async fn data<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        self.execute::<T>(req).await?.into_data()
    }

    /// Send and discard any payload. Returns the backend's message, if any.
    pub(crate) async fn ack(&self, req: RequestBuilder) -> Result<Option<String>, ApiError> {
        let envelope = self.execute::<serde_json::Value>(req).await?;
        Ok(envelope.message)
    }

    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<ApiResponse<T>, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let url = resp.url().path().to_string();
        let body = resp.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path = %url, "request unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = failure_message(&body);
            tracing::debug!(path = %url, status = status.as_u16(), ?message, "request rejected");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        if !envelope.success {
            tracing::debug!(path = %url, message = ?envelope.message, "envelope reported failure");
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }
}

/// Pull `message` out of an error body, if it is an envelope at all.
fn failure_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.message)
}
