use reqwest::Method;

use homestay_auth::UserProfile;

use crate::dto::UpdateProfileRequest;
use crate::{ApiClient, ApiError};

pub struct UserService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl UserService<'_> {
    /// `GET /users/me`
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        let req = self.client.request(Method::GET, "/users/me");
        self.client.data(req).await
    }

    /// `PUT /users/me`
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<UserProfile, ApiError> {
        let req = self.client.request(Method::PUT, "/users/me").json(request);
        self.client.data(req).await
    }
}
