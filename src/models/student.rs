//! Student profile model.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::alumni::normalize_tags;
use super::{email_local_part, now_iso, required, User};
use crate::errors::AppError;

/// Profile of a currently enrolled student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub branch: String,
    pub roll_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    pub created_at: String,
}

impl StudentProfile {
    /// Placeholder profile created the first time a student opens the dashboard.
    pub fn default_for(user: &User) -> Self {
        let year = Utc::now().year();
        let serial = uuid::Uuid::new_v4().as_u128() % 1000;
        Self {
            id: format!("student-profile-{}", user.id),
            user_id: user.id.clone(),
            name: email_local_part(&user.email).to_string(),
            email: user.email.clone(),
            year,
            branch: "Computer Science".to_string(),
            roll_number: format!("CS{}{:03}", year, serial),
            interests: Some(Vec::new()),
            created_at: now_iso(),
        }
    }

    /// Replacement record after the owner edits the profile form.
    pub fn updated(&self, input: StudentProfileInput) -> Result<Self, AppError> {
        let name = required(&input.name, "Name")?;
        let branch = required(&input.branch, "Branch")?;
        let roll_number = required(&input.roll_number, "Roll number")?;
        if input.year <= 0 {
            return Err(AppError::Validation("Year must be positive".to_string()));
        }

        Ok(Self {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name,
            email: self.email.clone(),
            year: input.year,
            branch,
            roll_number,
            interests: input.interests.map(normalize_tags),
            created_at: self.created_at.clone(),
        })
    }
}

/// Request body for editing a student profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileInput {
    pub name: String,
    pub year: i32,
    pub branch: String,
    pub roll_number: String,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_default_roll_number_shape() {
        let user = User::new("jane.smith@student.edu", Role::Student).unwrap();
        let profile = StudentProfile::default_for(&user);
        let year = Utc::now().year();

        assert_eq!(profile.name, "jane.smith");
        assert!(profile.roll_number.starts_with(&format!("CS{}", year)));
        assert_eq!(profile.roll_number.len(), 2 + 4 + 3);
        assert_eq!(profile.interests, Some(vec![]));
    }

    #[test]
    fn test_optional_interests_round_trip() {
        let stored = r#"{"id":"student-profile-1","userId":"student-1","name":"Jane Smith","email":"jane.smith@student.edu","year":2024,"branch":"Computer Science","rollNumber":"CS2024001","createdAt":"2025-01-01T00:00:00.000Z"}"#;
        let profile: StudentProfile = serde_json::from_str(stored).unwrap();
        assert_eq!(profile.interests, None);
        assert_eq!(serde_json::to_string(&profile).unwrap(), stored);
    }

    #[test]
    fn test_updated_rejects_blank_roll_number() {
        let user = User::new("s@student.edu", Role::Student).unwrap();
        let profile = StudentProfile::default_for(&user);
        let result = profile.updated(StudentProfileInput {
            name: "S".to_string(),
            year: 2025,
            branch: "Civil".to_string(),
            roll_number: "".to_string(),
            interests: None,
        });
        assert!(result.is_err());
    }
}
