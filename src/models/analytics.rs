//! Admin dashboard aggregates.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;

use super::{
    AlumniProfile, Donation, DonationSummary, Event, MentorshipRequest, MentorshipStatus,
    StudentProfile,
};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BranchCount {
    pub branch: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventParticipation {
    pub event_id: String,
    pub title: String,
    pub date: String,
    pub attendees: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDonations {
    /// e.g. `Feb 2025`
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: MentorshipStatus,
    pub count: usize,
}

/// Everything the admin analytics view renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalAnalytics {
    pub total_alumni: usize,
    pub approved_alumni: usize,
    pub pending_approvals: usize,
    pub active_mentors: usize,
    /// Percentage of profiles approved, one decimal place
    pub approval_rate: f64,
    pub total_students: usize,
    pub total_events: usize,
    pub upcoming_events: usize,
    pub total_rsvps: usize,
    pub donations: DonationSummary,
    pub alumni_by_year: Vec<YearCount>,
    pub alumni_by_branch: Vec<BranchCount>,
    pub event_participation: Vec<EventParticipation>,
    pub donations_by_month: Vec<MonthlyDonations>,
    pub mentorship_status: Vec<StatusCount>,
}

impl PortalAnalytics {
    pub fn compute(
        alumni: &[AlumniProfile],
        students: &[StudentProfile],
        events: &[Event],
        requests: &[MentorshipRequest],
        donations: &[Donation],
        today: NaiveDate,
    ) -> Self {
        let approved_alumni = alumni.iter().filter(|p| p.is_approved).count();
        let active_mentors = alumni.iter().filter(|p| p.is_available_mentor()).count();
        let approval_rate = if alumni.is_empty() {
            0.0
        } else {
            let pct = approved_alumni as f64 * 100.0 / alumni.len() as f64;
            (pct * 10.0).round() / 10.0
        };

        let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
        for p in alumni {
            *by_year.entry(p.year).or_default() += 1;
        }

        // Branches keep first-seen order.
        let mut alumni_by_branch: Vec<BranchCount> = Vec::new();
        for p in alumni {
            match alumni_by_branch.iter_mut().find(|b| b.branch == p.branch) {
                Some(entry) => entry.count += 1,
                None => alumni_by_branch.push(BranchCount {
                    branch: p.branch.clone(),
                    count: 1,
                }),
            }
        }

        let event_participation: Vec<EventParticipation> = events
            .iter()
            .map(|e| EventParticipation {
                event_id: e.id.clone(),
                title: e.title.clone(),
                date: e.date.clone(),
                attendees: e.attendee_count(),
            })
            .collect();

        let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for d in donations {
            match DateTime::parse_from_rfc3339(&d.created_at) {
                Ok(ts) => *by_month.entry((ts.year(), ts.month())).or_default() += d.amount,
                Err(_) => tracing::warn!(
                    donation_id = %d.id,
                    "Skipping donation with unparseable createdAt in monthly totals"
                ),
            }
        }

        let mut by_status: BTreeMap<MentorshipStatus, usize> = BTreeMap::new();
        for r in requests {
            *by_status.entry(r.status).or_default() += 1;
        }

        Self {
            total_alumni: alumni.len(),
            approved_alumni,
            pending_approvals: alumni.len() - approved_alumni,
            active_mentors,
            approval_rate,
            total_students: students.len(),
            total_events: events.len(),
            upcoming_events: events.iter().filter(|e| e.is_upcoming(today)).count(),
            total_rsvps: event_participation.iter().map(|e| e.attendees).sum(),
            donations: DonationSummary::from_donations(donations),
            alumni_by_year: by_year
                .into_iter()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
            alumni_by_branch,
            event_participation,
            donations_by_month: by_month
                .into_iter()
                .map(|((year, month), amount)| MonthlyDonations {
                    month: format!("{} {}", MONTH_LABELS[(month - 1) as usize], year),
                    amount,
                })
                .collect(),
            mentorship_status: by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
        }
    }
}
