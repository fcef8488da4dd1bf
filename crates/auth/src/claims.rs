use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use homestay_core::UserId;

use crate::{Role, UserProfile};

/// Standard alphabet that tolerates missing padding, since token segments are
/// emitted unpadded.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims read from the payload segment of a bearer token.
///
/// These are **unverified**. They are only good enough to rebuild a usable
/// identity after a restart when no cached profile is available; the backend
/// re-checks the signature on every request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject; the backend puts the numeric user id here.
    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default)]
    pub id: Option<UserId>,

    pub username: String,

    pub email: String,

    pub role: Role,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub iat: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub exp: Option<DateTime<Utc>>,
}

impl TokenClaims {
    /// User id from `id`, falling back to a numeric `sub`.
    pub fn user_id(&self) -> Option<UserId> {
        self.id
            .or_else(|| self.sub.as_deref().and_then(|sub| sub.parse().ok()))
    }

    pub fn into_profile(self) -> Option<UserProfile> {
        let id = self.user_id()?;
        Some(UserProfile::new(id, self.username, self.email, self.role))
    }
}

#[derive(Debug, Error)]
pub enum TokenDecodeError {
    #[error("token is not three dot-separated segments")]
    Malformed,

    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not a valid claims record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the payload segment of `header.payload.signature`.
///
/// No signature verification is performed.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenDecodeError> {
    let mut parts = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenDecodeError::Malformed);
    };

    let normalized = payload.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE.decode(normalized)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Identity carried by a token, or `None` when it cannot be read.
///
/// Total over its input: any decode failure is treated the same as an absent
/// session.
pub fn identity_from_token(token: &str) -> Option<UserProfile> {
    match decode_claims(token) {
        Ok(claims) => {
            let profile = claims.into_profile();
            if profile.is_none() {
                tracing::debug!("token payload carries no numeric user id");
            }
            profile
        }
        Err(err) => {
            tracing::debug!(error = %err, "could not derive identity from token");
            None
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Check the time window of decoded claims. Absent timestamps are not checked.
///
/// This is advisory only; an expired token is still sent and the backend's
/// 401 decides.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if let (Some(iat), Some(exp)) = (claims.iat, claims.exp) {
        if exp <= iat {
            return Err(TokenValidationError::InvalidTimeWindow);
        }
    }
    if let Some(iat) = claims.iat {
        if now < iat {
            return Err(TokenValidationError::NotYetValid);
        }
    }
    if let Some(exp) = claims.exp {
        if now >= exp {
            return Err(TokenValidationError::Expired);
        }
    }
    Ok(())
}
