use reqwest::Method;

use crate::dto::Property;
use crate::{ApiClient, ApiError};

pub const DEFAULT_LIMIT: u32 = 10;

pub struct RecommendationService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl RecommendationService<'_> {
    /// Blended recommendations for the signed-in user.
    pub async fn blended(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.fetch("/recommendations", limit).await
    }

    pub async fn collaborative(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.fetch("/recommendations/collaborative", limit).await
    }

    pub async fn content_based(&self, limit: u32) -> Result<Vec<Property>, ApiError> {
        self.fetch("/recommendations/content-based", limit).await
    }

    async fn fetch(&self, path: &str, limit: u32) -> Result<Vec<Property>, ApiError> {
        let req = self.client.request(Method::GET, path).query(&[("limit", limit)]);
        self.client.data(req).await
    }
}
