//! Data models for the alumni portal.
//!
//! Field names serialize in camelCase so records round-trip with state written by the
//! browser front end under the same storage keys.

mod alumni;
mod analytics;
mod donation;
mod event;
mod mentorship;
mod student;
mod user;

pub use alumni::*;
pub use analytics::*;
pub use donation::*;
pub use event::*;
pub use mentorship::*;
pub use student::*;
pub use user::*;

use chrono::{SecondsFormat, Utc};

use crate::errors::AppError;

/// Current time as an ISO-8601 string with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fresh record identifier of the form `<prefix>-<uuid>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Local part of an email address, used as a placeholder display name.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Trim a required text field, rejecting blank values.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank values to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_prefix() {
        let id = new_id("event");
        assert!(id.starts_with("event-"));
        assert_ne!(id, new_id("event"));
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("jane.smith@student.edu"), "jane.smith");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_required_and_optional() {
        assert_eq!(required("  Title ", "Title").unwrap(), "Title");
        assert!(matches!(
            required("   ", "Title"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" hi ".to_string())), Some("hi".to_string()));
    }
}
