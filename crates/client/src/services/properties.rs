use reqwest::Method;

use homestay_core::PropertyId;

use crate::dto::{Property, PropertyListQuery, PropertyOccupancy, PropertyRequest, PropertySearch};
use crate::{ApiClient, ApiError, Page, PageRequest};

pub struct PropertyService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl PropertyService<'_> {
    pub async fn list(&self, query: &PropertyListQuery) -> Result<Page<Property>, ApiError> {
        let req = self.client.request(Method::GET, "/properties").query(query);
        self.client.data(req).await
    }

    pub async fn get(&self, id: PropertyId) -> Result<Property, ApiError> {
        let req = self.client.request(Method::GET, &format!("/properties/{id}"));
        self.client.data(req).await
    }

    pub async fn search(&self, search: &PropertySearch) -> Result<Page<Property>, ApiError> {
        let req = self.client.request(Method::GET, "/properties/search").query(search);
        self.client.data(req).await
    }

    pub async fn popular(&self) -> Result<Vec<Property>, ApiError> {
        let req = self.client.request(Method::GET, "/properties/popular");
        self.client.data(req).await
    }

    pub async fn top_rated(&self) -> Result<Vec<Property>, ApiError> {
        let req = self.client.request(Method::GET, "/properties/top-rated");
        self.client.data(req).await
    }

    pub async fn create(&self, request: &PropertyRequest) -> Result<Property, ApiError> {
        let req = self.client.request(Method::POST, "/properties").json(request);
        self.client.data(req).await
    }

    pub async fn update(&self, id: PropertyId, request: &PropertyRequest) -> Result<Property, ApiError> {
        let req = self
            .client
            .request(Method::PUT, &format!("/properties/{id}"))
            .json(request);
        self.client.data(req).await
    }

    pub async fn delete(&self, id: PropertyId) -> Result<Option<String>, ApiError> {
        let req = self.client.request(Method::DELETE, &format!("/properties/{id}"));
        self.client.ack(req).await
    }

    /// Listings owned by the signed-in landlord.
    pub async fn mine(&self, page: PageRequest) -> Result<Page<Property>, ApiError> {
        let req = self
            .client
            .request(Method::GET, "/properties/landlord/my-properties")
            .query(&page);
        self.client.data(req).await
    }

    pub async fn occupancy(&self, page: PageRequest) -> Result<Page<PropertyOccupancy>, ApiError> {
        let req = self
            .client
            .request(Method::GET, "/properties/landlord/occupancy")
            .query(&page);
        self.client.data(req).await
    }
}
