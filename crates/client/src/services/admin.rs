use reqwest::Method;
use serde::Serialize;

use homestay_auth::Role;
use homestay_core::{PropertyId, UserId};

use crate::dto::{AdminAccount, Property, PropertyOccupancy};
use crate::{ApiClient, ApiError, Page, PageRequest};

/// Account listing filter. `role: None` lists every account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminUserFilter {
    pub role: Option<Role>,
    pub page: PageRequest,
}

#[derive(Serialize)]
struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    page: u32,
    size: u32,
}

impl From<AdminUserFilter> for UserQuery {
    fn from(filter: AdminUserFilter) -> Self {
        Self {
            role: filter.role.map(|role| role.backend_name()),
            page: filter.page.page,
            size: filter.page.size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccupancyFilter {
    pub landlord_id: Option<UserId>,
    pub page: PageRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OccupancyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    landlord_id: Option<UserId>,
    page: u32,
    size: u32,
}

impl From<OccupancyFilter> for OccupancyQuery {
    fn from(filter: OccupancyFilter) -> Self {
        Self {
            landlord_id: filter.landlord_id,
            page: filter.page.page,
            size: filter.page.size,
        }
    }
}

pub struct AdminService<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AdminService<'_> {
    pub async fn users(&self, filter: AdminUserFilter) -> Result<Page<AdminAccount>, ApiError> {
        let req = self
            .client
            .request(Method::GET, "/admin/users")
            .query(&UserQuery::from(filter));
        self.client.data(req).await
    }

    /// Freeze (or with `freeze = false`, thaw) an account.
    pub async fn freeze_user(&self, id: UserId, freeze: bool) -> Result<AdminAccount, ApiError> {
        let req = self
            .client
            .request(Method::PUT, &format!("/admin/users/{id}/freeze"))
            .query(&[("freeze", freeze)]);
        self.client.data(req).await
    }

    pub async fn occupancy(&self, filter: OccupancyFilter) -> Result<Page<PropertyOccupancy>, ApiError> {
        let req = self
            .client
            .request(Method::GET, "/admin/properties/occupancy")
            .query(&OccupancyQuery::from(filter));
        self.client.data(req).await
    }

    pub async fn freeze_property(&self, id: PropertyId, freeze: bool) -> Result<Property, ApiError> {
        let req = self
            .client
            .request(Method::PUT, &format!("/admin/properties/{id}/freeze"))
            .query(&[("freeze", freeze)]);
        self.client.data(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_roles_omits_role_param() {
        let query = UserQuery::from(AdminUserFilter::default());
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"page": 0, "size": 10})
        );
    }

    #[test]
    fn role_filter_uses_backend_spelling() {
        let query = UserQuery::from(AdminUserFilter {
            role: Some(Role::Tenant),
            page: PageRequest::new(2, 20),
        });
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"role": "USER", "page": 2, "size": 20})
        );
    }

    #[test]
    fn occupancy_query_names_landlord_in_camel_case() {
        let query = OccupancyQuery::from(OccupancyFilter {
            landlord_id: Some(UserId::new(5)),
            page: PageRequest::default(),
        });
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({"landlordId": 5, "page": 0, "size": 10})
        );
    }
}
