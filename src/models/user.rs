//! User account model.

use serde::{Deserialize, Serialize};

use super::{new_id, now_iso, required};
use crate::errors::AppError;

/// Portal role, fixed when the account is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Alumni,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Alumni => "alumni",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "alumni" => Some(Role::Alumni),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A portal account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl User {
    /// Build a new account for the given email and role.
    pub fn new(email: &str, role: Role) -> Result<Self, AppError> {
        let email = required(email, "Email")?;
        Ok(Self {
            id: new_id(role.as_str()),
            email,
            role,
            created_at: now_iso(),
        })
    }
}

/// Request body for signing in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Alumni).unwrap(), "\"alumni\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("faculty"), None);
    }

    #[test]
    fn test_user_new() {
        let user = User::new(" jane@student.edu ", Role::Student).unwrap();
        assert_eq!(user.email, "jane@student.edu");
        assert!(user.id.starts_with("student-"));

        assert!(User::new("", Role::Admin).is_err());
    }

    #[test]
    fn test_user_reads_stored_shape() {
        let stored = r#"{"id":"admin-1","email":"admin@college.edu","role":"admin","createdAt":"2025-01-01T00:00:00.000Z"}"#;
        let user: User = serde_json::from_str(stored).unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.created_at, "2025-01-01T00:00:00.000Z");
        assert_eq!(serde_json::to_string(&user).unwrap(), stored);
    }
}
