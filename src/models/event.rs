//! Event model with RSVP tracking.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{new_id, now_iso, optional, required};
use crate::errors::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A scheduled portal event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local start time, `HH:MM`
    pub time: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Informational only; RSVPs are not capped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<i64>,
    pub created_by: String,
    pub created_at: String,
    /// User ids that have RSVP'd, in the order they joined
    pub rsvp_list: Vec<String>,
}

impl Event {
    /// Build a new event from the admin form.
    pub fn from_input(input: EventInput, created_by: &str) -> Result<Self, AppError> {
        let fields = EventFields::validate(input)?;
        Ok(Self {
            id: new_id("event"),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            image_url: fields.image_url,
            max_attendees: fields.max_attendees,
            created_by: created_by.to_string(),
            created_at: now_iso(),
            rsvp_list: Vec::new(),
        })
    }

    /// Replacement record after an edit. Identity, author and RSVPs are carried over.
    pub fn updated(&self, input: EventInput) -> Result<Self, AppError> {
        let fields = EventFields::validate(input)?;
        Ok(Self {
            id: self.id.clone(),
            title: fields.title,
            description: fields.description,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            image_url: fields.image_url,
            max_attendees: fields.max_attendees,
            created_by: self.created_by.clone(),
            created_at: self.created_at.clone(),
            rsvp_list: self.rsvp_list.clone(),
        })
    }

    pub fn is_rsvped(&self, user_id: &str) -> bool {
        self.rsvp_list.iter().any(|id| id == user_id)
    }

    pub fn attendee_count(&self) -> usize {
        self.rsvp_list.len()
    }

    /// Replacement record with `user_id` removed if present, appended otherwise.
    pub fn with_rsvp_toggled(&self, user_id: &str) -> Self {
        let rsvp_list = if self.is_rsvped(user_id) {
            self.rsvp_list
                .iter()
                .filter(|id| id.as_str() != user_id)
                .cloned()
                .collect()
        } else {
            let mut list = self.rsvp_list.clone();
            list.push(user_id.to_string());
            list
        };
        Self {
            rsvp_list,
            ..self.clone()
        }
    }

    /// Parsed event date, `None` when the stored value is not `YYYY-MM-DD`.
    pub fn event_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Scheduled for `today` or later.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.event_date().is_some_and(|d| d >= today)
    }

    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.event_date().is_some_and(|d| d < today)
    }
}

/// Validated event form fields shared by create and edit.
struct EventFields {
    title: String,
    description: String,
    date: String,
    time: String,
    location: String,
    image_url: Option<String>,
    max_attendees: Option<i64>,
}

impl EventFields {
    fn validate(input: EventInput) -> Result<Self, AppError> {
        let title = required(&input.title, "Title")?;
        let description = required(&input.description, "Description")?;
        let location = required(&input.location, "Location")?;

        let date = input.date.trim().to_string();
        if NaiveDate::parse_from_str(&date, DATE_FORMAT).is_err() {
            return Err(AppError::Validation(format!(
                "Invalid event date '{}', expected YYYY-MM-DD",
                date
            )));
        }
        let time = input.time.trim().to_string();
        if NaiveTime::parse_from_str(&time, TIME_FORMAT).is_err() {
            return Err(AppError::Validation(format!(
                "Invalid event time '{}', expected HH:MM",
                time
            )));
        }
        if input.max_attendees.is_some_and(|n| n <= 0) {
            return Err(AppError::Validation(
                "Max attendees must be positive when set".to_string(),
            ));
        }

        Ok(Self {
            title,
            description,
            date,
            time,
            location,
            image_url: optional(input.image_url),
            max_attendees: input.max_attendees,
        })
    }
}

/// Request body for creating or editing an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub max_attendees: Option<i64>,
}

/// Which slice of the calendar to list.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

impl EventFilter {
    pub fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Upcoming => event.is_upcoming(today),
            EventFilter::Past => event.is_past(today),
        }
    }
}

/// Query string for listing events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    #[serde(default)]
    pub filter: EventFilter,
}
