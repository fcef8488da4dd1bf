use core::str::FromStr;

use serde::{Deserialize, Serialize};

use homestay_core::DomainError;

/// Role carried in the user profile and in the token payload.
///
/// The backend spells roles in several ways depending on the endpoint
/// (`USER`, `ROLE_LANDLORD`, ...). Parsing accepts all of them; the canonical
/// form written back out is the bare upper-case name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Tenant,
    Landlord,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Tenant, Role::Landlord, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "TENANT",
            Role::Landlord => "LANDLORD",
            Role::Admin => "ADMIN",
        }
    }

    /// Spelling the backend's account endpoints expect (tenants are `USER`).
    pub fn backend_name(&self) -> &'static str {
        match self {
            Role::Tenant => "USER",
            Role::Landlord => "LANDLORD",
            Role::Admin => "ADMIN",
        }
    }

    /// Landlord-level access. Admins inherit it.
    pub fn is_landlord(&self) -> bool {
        matches!(self, Role::Landlord | Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match bare {
            "TENANT" | "USER" => Ok(Role::Tenant),
            "LANDLORD" => Ok(Role::Landlord),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(DomainError::unknown_role(s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_spellings() {
        assert_eq!("ROLE_USER".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!("tenant".parse::<Role>().unwrap(), Role::Tenant);
        assert_eq!("ROLE_LANDLORD".parse::<Role>().unwrap(), Role::Landlord);
        assert_eq!("ROLE_ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "ROLE_GUEST".parse::<Role>().unwrap_err();
        assert_eq!(err, DomainError::unknown_role("ROLE_GUEST"));
    }

    #[test]
    fn serializes_canonical_name() {
        assert_eq!(serde_json::to_string(&Role::Landlord).unwrap(), "\"LANDLORD\"");
        let parsed: Role = serde_json::from_str("\"ROLE_ADMIN\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn backend_name_round_trips() {
        for role in Role::ALL {
            assert_eq!(role.backend_name().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn admin_inherits_landlord_access() {
        assert!(Role::Admin.is_landlord());
        assert!(Role::Landlord.is_landlord());
        assert!(!Role::Tenant.is_landlord());
        assert!(!Role::Landlord.is_admin());
    }
}
