//! Request and response bodies, in the backend's camelCase wire shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use homestay_auth::{Role, UserProfile};
use homestay_core::{DomainError, DomainResult, OrderId, PropertyId, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username is required"));
        }
        if self.password.is_empty() {
            return Err(DomainError::validation("password is required"));
        }
        Ok(())
    }
}

/// `data` of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl LoginResponse {
    /// Split into the credential and the profile the session stores.
    pub fn into_parts(self) -> (String, UserProfile) {
        let profile = UserProfile::new(self.id, self.username, self.email, self.role);
        (self.token, profile)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "backend_role")]
    pub role: Option<Role>,
}

fn backend_role<S>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match role {
        Some(role) => serializer.serialize_str(role.backend_name()),
        None => serializer.serialize_none(),
    }
}

impl RegisterRequest {
    /// Mirrors the backend's field constraints so obvious mistakes are caught
    /// before a round trip.
    pub fn validate(&self) -> DomainResult<()> {
        let name_len = self.username.trim().chars().count();
        if !(3..=50).contains(&name_len) {
            return Err(DomainError::validation("username must be 3 to 50 characters"));
        }
        let pass_len = self.password.chars().count();
        if !(6..=100).contains(&pass_len) {
            return Err(DomainError::validation("password must be 6 to 100 characters"));
        }
        if !looks_like_email(&self.email) {
            return Err(DomainError::validation("email is not valid"));
        }
        Ok(())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                return Err(DomainError::validation("email is not valid"));
            }
        }
        if let Some(password) = &self.password {
            if !password.is_empty() && !(6..=100).contains(&password.chars().count()) {
                return Err(DomainError::validation("password must be 6 to 100 characters"));
            }
        }
        Ok(())
    }
}

/// Account row as listed by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub enabled: Option<bool>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub max_guests: Option<u32>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub landlord_id: Option<UserId>,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub images: Option<String>,
    #[serde(default)]
    pub remaining_rooms: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub city: String,
    pub district: String,
    pub address: String,
    pub price: Decimal,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub max_guests: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
}

impl PropertyRequest {
    pub fn validate(&self) -> DomainResult<()> {
        for (field, value) in [
            ("title", &self.title),
            ("city", &self.city),
            ("district", &self.district),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!("{field} is required")));
            }
        }
        if self.price <= Decimal::ZERO {
            return Err(DomainError::validation("price must be greater than 0"));
        }
        if self.bedrooms == 0 || self.bathrooms == 0 || self.max_guests == 0 {
            return Err(DomainError::validation("bedrooms, bathrooms and max guests must be at least 1"));
        }
        Ok(())
    }
}

/// Listing order for `GET /properties`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_dir: SortDirection,
}

impl Default for PropertyListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: crate::PageRequest::DEFAULT_SIZE,
            sort_by: "createdAt".to_string(),
            sort_dir: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Filters for `GET /properties/search`; unset filters are not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    pub page: u32,
    pub size: u32,
}

impl Default for PropertySearch {
    fn default() -> Self {
        Self {
            city: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            page: 0,
            size: crate::PageRequest::DEFAULT_SIZE,
        }
    }
}

/// Occupancy figures for one listing (landlord and admin views).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOccupancy {
    pub id: PropertyId,
    pub title: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub booking_count: Option<u32>,
    #[serde(default)]
    pub occupied_rooms: Option<u32>,
    #[serde(default)]
    pub remaining_rooms: Option<i32>,
    #[serde(default)]
    pub active_guests: Option<u32>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub landlord_id: Option<UserId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Orders
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub property_id: PropertyId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    pub status: OrderStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub property_id: PropertyId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl OrderRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.guest_count == 0 {
            return Err(DomainError::validation("must have at least 1 guest"));
        }
        if self.check_out_date <= self.check_in_date {
            return Err(DomainError::validation("check-out must be after check-in"));
        }
        Ok(())
    }

    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}
