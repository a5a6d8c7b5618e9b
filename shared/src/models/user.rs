//! User Model
//!
//! Staff accounts. Each user holds exactly one [`StaffRole`]; the role decides
//! both endpoint permissions and which order status transitions the user may
//! drive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role (员工角色)
///
/// SUPER_ADMIN observes and administers reference data but never moves
/// orders through the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Reception,
    Cashier,
    Chef,
    SuperAdmin,
}

impl StaffRole {
    /// All roles, in a stable order (useful for table-driven tests)
    pub const ALL: [StaffRole; 4] = [
        StaffRole::Reception,
        StaffRole::Cashier,
        StaffRole::Chef,
        StaffRole::SuperAdmin,
    ];

    /// Canonical storage/wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Reception => "RECEPTION",
            StaffRole::Cashier => "CASHIER",
            StaffRole::Chef => "CHEF",
            StaffRole::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RECEPTION" => Ok(StaffRole::Reception),
            "CASHIER" => Ok(StaffRole::Cashier),
            "CHEF" => Ok(StaffRole::Chef),
            "SUPER_ADMIN" => Ok(StaffRole::SuperAdmin),
            other => Err(format!("unknown staff role: {other}")),
        }
    }
}

/// User entity (员工账号)
///
/// The password hash never leaves the repository layer; this model is what
/// the API returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: StaffRole,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: StaffRole,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub display_name: Option<String>,
    pub password: Option<String>,
    pub role: Option<StaffRole>,
    pub is_active: Option<bool>,
}

// ====== Auth DTOs ======

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: bearer token plus the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_str_roundtrip() {
        for role in StaffRole::ALL {
            assert_eq!(StaffRole::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!(StaffRole::from_str("MANAGER").is_err());
        assert!(StaffRole::from_str("cashier").is_err());
        assert!(StaffRole::from_str("").is_err());
    }

    #[test]
    fn test_role_serde_screaming_snake() {
        let json = serde_json::to_string(&StaffRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
        let role: StaffRole = serde_json::from_str("\"RECEPTION\"").unwrap();
        assert_eq!(role, StaffRole::Reception);
    }
}
