//! Mentorship request model.

use serde::{Deserialize, Serialize};

use super::{new_id, now_iso, required, AlumniProfile, StudentProfile, User};
use crate::errors::AppError;

/// Review state of a mentorship request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipStatus {
    Pending,
    Approved,
    Rejected,
}

impl MentorshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentorshipStatus::Pending => "pending",
            MentorshipStatus::Approved => "approved",
            MentorshipStatus::Rejected => "rejected",
        }
    }
}

/// A student's request to be mentored by an alumnus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MentorshipRequest {
    pub id: String,
    /// User id of the requesting student
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    /// Profile id of the requested alumnus
    pub alumni_id: String,
    pub alumni_name: String,
    pub message: String,
    pub status: MentorshipStatus,
    pub created_at: String,
}

impl MentorshipRequest {
    /// Build a pending request. The student's profile name is used when one exists,
    /// otherwise the account email stands in.
    pub fn new(
        student: &User,
        student_profile: Option<&StudentProfile>,
        mentor: &AlumniProfile,
        message: &str,
    ) -> Result<Self, AppError> {
        let message = required(message, "Message")?;
        let student_name = student_profile
            .map(|p| p.name.clone())
            .unwrap_or_else(|| student.email.clone());

        Ok(Self {
            id: new_id("mentorship"),
            student_id: student.id.clone(),
            student_name,
            student_email: student.email.clone(),
            alumni_id: mentor.id.clone(),
            alumni_name: mentor.name.clone(),
            message,
            status: MentorshipStatus::Pending,
            created_at: now_iso(),
        })
    }

    /// Replacement record carrying the mentor's decision.
    pub fn with_status(&self, status: MentorshipStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Request body for a new mentorship request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorshipRequest {
    /// Profile id of the alumnus to contact
    pub alumni_id: String,
    pub message: String,
}

/// Request body for reviewing a mentorship request.
#[derive(Debug, Clone, Deserialize)]
pub struct MentorshipStatusUpdate {
    pub status: MentorshipStatus,
}
