use reqwest::Method;

use homestay_core::OrderId;

use crate::dto::{Order, OrderRequest, OrderStatus};
use crate::{ApiClient, ApiError, Page, PageRequest};

pub struct OrderService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl OrderService<'_> {
    pub async fn create(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        let req = self.client.request(Method::POST, "/orders").json(request);
        self.client.data(req).await
    }

    pub async fn mine(&self, page: PageRequest) -> Result<Page<Order>, ApiError> {
        let req = self.client.request(Method::GET, "/orders/my-orders").query(&page);
        self.client.data(req).await
    }

    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        let req = self.client.request(Method::GET, &format!("/orders/{id}"));
        self.client.data(req).await
    }

    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, ApiError> {
        let req = self
            .client
            .request(Method::PUT, &format!("/orders/{id}/status"))
            .query(&[("status", status.as_str())]);
        self.client.data(req).await
    }

    /// Request cancellation. Confirmed stays may need landlord review.
    pub async fn cancel(&self, id: OrderId) -> Result<Option<String>, ApiError> {
        let req = self.client.request(Method::DELETE, &format!("/orders/{id}"));
        self.client.ack(req).await
    }

    /// Orders placed against the signed-in landlord's listings.
    pub async fn landlord(&self, page: PageRequest) -> Result<Page<Order>, ApiError> {
        let req = self.client.request(Method::GET, "/orders/landlord").query(&page);
        self.client.data(req).await
    }

    pub async fn review_cancellation(&self, id: OrderId, approve: bool) -> Result<Option<String>, ApiError> {
        let req = self
            .client
            .request(Method::POST, &format!("/orders/{id}/review"))
            .query(&[("approve", approve)]);
        self.client.ack(req).await
    }
}
