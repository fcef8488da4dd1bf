use reqwest::Method;

use homestay_core::UserId;

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::{ApiClient, ApiError};

pub struct AuthService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AuthService<'_> {
    /// `POST /auth/login`. The caller is responsible for storing the token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let req = self.client.request(Method::POST, "/auth/login").json(request);
        self.client.data(req).await
    }

    /// `POST /auth/register`. Returns the new account's id; registering does
    /// not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserId, ApiError> {
        let req = self.client.request(Method::POST, "/auth/register").json(request);
        self.client.data(req).await
    }
}
