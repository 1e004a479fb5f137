//! Operator and account records mirrored from the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role driving permission lookups.
///
/// The backend reports roles in upper case (`"ADMIN"`); parsing is
/// case-insensitive so the permission matrix always sees a normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full access to every resource.
    Admin,
    /// Day-to-day operations without destructive rights.
    Manager,
    /// Staff member with access to their own work.
    Stylist,
    /// End customer; no administrative access.
    Customer,
}

/// Error returned when a role string is not one of the four known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "stylist" => Ok(Self::Stylist),
            "customer" => Ok(Self::Customer),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Stylist => "stylist",
            Self::Customer => "customer",
        };
        f.write_str(label)
    }
}

/// Account record as reported by `/auth/profile` and `/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    pub id: String,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Role driving permission lookups.
    pub role: Role,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the email address has been verified.
    #[serde(default)]
    pub email_verified: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ADMIN", Role::Admin)]
    #[case("admin", Role::Admin)]
    #[case(" Manager ", Role::Manager)]
    #[case("STYLIST", Role::Stylist)]
    #[case("customer", Role::Customer)]
    fn parses_roles_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
    }

    #[test]
    fn unknown_roles_are_rejected() {
        let err = "superuser".parse::<Role>().expect_err("must fail");
        assert_eq!(err, UnknownRole("superuser".to_owned()));
    }

    #[test]
    fn deserialises_upper_case_wire_roles() {
        let json = r#"{
            "id": "u1",
            "email": "admin@example.com",
            "fullName": "Admin",
            "role": "ADMIN",
            "isActive": true,
            "emailVerified": true,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).expect("valid user");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.full_name, "Admin");
    }
}
