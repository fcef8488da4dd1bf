use thiserror::Error;

/// Shown when the backend gave no message of its own.
pub const GENERIC_FAILURE: &str = "Request failed, please try again later";

/// Shown when the backend answered 401.
pub const SIGN_IN_REQUIRED: &str = "Please sign in first";

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The session's credential is missing, expired or revoked.
    #[error("not authenticated (401)")]
    Unauthorized,

    /// Any other failure status, or a 2xx envelope with `success: false`.
    #[error("request rejected ({status}): {}", .message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Rejected { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope reported success but carried no `data`.
    #[error("response carried no data")]
    MissingData,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => SIGN_IN_REQUIRED.to_string(),
            ApiError::Rejected {
                message: Some(message), ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ApiError::Rejected {
            status: 400,
            message: Some("Email already in use".into()),
        };
        assert_eq!(err.user_message(), "Email already in use");
        assert_eq!(err.to_string(), "request rejected (400): Email already in use");
    }

    #[test]
    fn user_message_falls_back_to_generic_text() {
        let blank = ApiError::Rejected {
            status: 500,
            message: Some("  ".into()),
        };
        assert_eq!(blank.user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::MissingData.user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Unauthorized.user_message(), SIGN_IN_REQUIRED);
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
