use serde::{Deserialize, Serialize};

use homestay_core::UserId;

use crate::Role;

/// Identity of the signed-in user as the client knows it.
///
/// This is what gets mirrored into durable storage under the `user` key.
/// Extra fields the backend returns (timestamps, `enabled`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role,
            phone: None,
            avatar: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_backend_user_record() {
        let raw = r#"{
            "id": 12,
            "username": "lin",
            "email": "lin@example.com",
            "phone": "13800000000",
            "role": "LANDLORD",
            "enabled": true,
            "createdAt": "2024-05-01T10:00:00"
        }"#;
        let profile: UserProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.id, UserId::new(12));
        assert_eq!(profile.role, Role::Landlord);
        assert_eq!(profile.phone.as_deref(), Some("13800000000"));
        assert_eq!(profile.avatar, None);
    }

    #[test]
    fn omits_absent_optional_fields() {
        let profile = UserProfile::new(UserId::new(1), "a", "a@example.com", Role::Tenant);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("phone"));
        assert!(!json.contains("avatar"));
    }
}
