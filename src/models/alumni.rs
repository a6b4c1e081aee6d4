//! Alumni profile model and directory search.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{email_local_part, now_iso, optional, required, User};
use crate::errors::AppError;

/// Public profile of a graduate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlumniProfile {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub year: i32,
    pub branch: String,
    pub company: String,
    pub linkedin_url: String,
    pub is_approved: bool,
    pub is_available_as_mentor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

impl AlumniProfile {
    /// Placeholder profile created the first time an alumni user opens the dashboard.
    /// It starts unapproved and hidden from the directory.
    pub fn default_for(user: &User) -> Self {
        let now = now_iso();
        Self {
            id: format!("alumni-profile-{}", user.id),
            user_id: user.id.clone(),
            name: email_local_part(&user.email).to_string(),
            email: user.email.clone(),
            year: Utc::now().year() - 2,
            branch: "Computer Science".to_string(),
            company: "Your Company".to_string(),
            linkedin_url: String::new(),
            is_approved: false,
            is_available_as_mentor: false,
            profile_image: None,
            bio: None,
            skills: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replacement record after the owner edits the profile form.
    ///
    /// Ownership, approval state and creation time are carried over.
    pub fn updated(&self, input: AlumniProfileInput) -> Result<Self, AppError> {
        let name = required(&input.name, "Name")?;
        let branch = required(&input.branch, "Branch")?;
        let company = required(&input.company, "Company")?;
        if input.year <= 0 {
            return Err(AppError::Validation(
                "Graduation year must be positive".to_string(),
            ));
        }

        Ok(Self {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            name,
            email: self.email.clone(),
            year: input.year,
            branch,
            company,
            linkedin_url: input.linkedin_url.trim().to_string(),
            is_approved: self.is_approved,
            is_available_as_mentor: input.is_available_as_mentor,
            profile_image: optional(input.profile_image),
            bio: optional(input.bio),
            skills: input.skills.map(normalize_tags),
            created_at: self.created_at.clone(),
            updated_at: now_iso(),
        })
    }

    /// Replacement record with the admin's approval decision applied.
    pub fn with_approval(&self, approve: bool) -> Self {
        Self {
            is_approved: approve,
            updated_at: now_iso(),
            ..self.clone()
        }
    }

    /// Approved and visible in the directory.
    pub fn is_listed(&self) -> bool {
        self.is_approved
    }

    /// Approved and accepting mentorship requests.
    pub fn is_available_mentor(&self) -> bool {
        self.is_approved && self.is_available_as_mentor
    }
}

/// Trim, drop blanks and duplicates while keeping first-seen order.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Request body for editing an alumni profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniProfileInput {
    pub name: String,
    pub year: i32,
    pub branch: String,
    pub company: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub is_available_as_mentor: bool,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// Request body for the admin approval action.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalRequest {
    pub approve: bool,
}

/// Directory filters, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniDirectoryQuery {
    /// Case-insensitive substring of name, company or branch
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub mentors_only: Option<bool>,
}

impl AlumniDirectoryQuery {
    pub fn matches(&self, profile: &AlumniProfile) -> bool {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = profile.name.to_lowercase().contains(&q)
                || profile.company.to_lowercase().contains(&q)
                || profile.branch.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(year) = self.year {
            if profile.year != year {
                return false;
            }
        }
        if let Some(branch) = self.branch.as_deref().filter(|b| !b.is_empty()) {
            if profile.branch != branch {
                return false;
            }
        }
        if self.mentors_only.unwrap_or(false) && !profile.is_available_as_mentor {
            return false;
        }
        true
    }
}

/// Directory search result with the facet values of the approved population.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniDirectory {
    pub profiles: Vec<AlumniProfile>,
    /// Distinct graduation years, newest first
    pub years: Vec<i32>,
    /// Distinct branches, alphabetical
    pub branches: Vec<String>,
}

impl AlumniDirectory {
    pub fn build(approved: Vec<AlumniProfile>, query: &AlumniDirectoryQuery) -> Self {
        let mut years: Vec<i32> = approved.iter().map(|p| p.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();

        let mut branches: Vec<String> = approved.iter().map(|p| p.branch.clone()).collect();
        branches.sort();
        branches.dedup();

        let profiles = approved.into_iter().filter(|p| query.matches(p)).collect();

        Self {
            profiles,
            years,
            branches,
        }
    }
}
