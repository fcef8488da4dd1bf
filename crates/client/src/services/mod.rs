//! One borrowed handle per backend area.
//!
//! Handles are cheap views over an [`ApiClient`]; they hold no state of their
//! own, so the token set on the client applies to every call.

mod admin;
mod auth;
mod orders;
mod properties;
mod recommendations;
mod users;

pub use admin::{AdminService, AdminUserFilter, OccupancyFilter};
pub use auth::AuthService;
pub use orders::OrderService;
pub use properties::PropertyService;
pub use recommendations::{DEFAULT_LIMIT, RecommendationService};
pub use users::UserService;

use crate::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService { client: self }
    }

    pub fn users(&self) -> UserService<'_> {
        UserService { client: self }
    }

    pub fn properties(&self) -> PropertyService<'_> {
        PropertyService { client: self }
    }

    pub fn orders(&self) -> OrderService<'_> {
        OrderService { client: self }
    }

    pub fn recommendations(&self) -> RecommendationService<'_> {
        RecommendationService { client: self }
    }

    pub fn admin(&self) -> AdminService<'_> {
        AdminService { client: self }
    }
}
