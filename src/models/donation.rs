//! Donation model and totals.

use serde::{Deserialize, Serialize};

use super::{email_local_part, new_id, now_iso, optional, User};
use crate::errors::AppError;

/// A completed contribution. Donations are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub donor_name: String,
    pub donor_email: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub payment_id: String,
    pub created_at: String,
}

impl Donation {
    /// Record a donation by `donor`. `display_name` is the donor's profile name when
    /// they have one.
    pub fn new(
        input: DonationInput,
        donor: &User,
        display_name: Option<&str>,
    ) -> Result<Self, AppError> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(AppError::Validation(
                "Donation amount must be greater than zero".to_string(),
            ));
        }

        let donor_name = display_name
            .map(str::to_string)
            .unwrap_or_else(|| email_local_part(&donor.email).to_string());

        Ok(Self {
            id: new_id("donation"),
            donor_id: donor.id.clone(),
            donor_name,
            donor_email: donor.email.clone(),
            amount: input.amount,
            message: optional(input.message),
            payment_id: new_payment_id(),
            created_at: now_iso(),
        })
    }
}

fn new_payment_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("pay_{}", &simple[..13])
}

/// Request body for making a donation.
#[derive(Debug, Clone, Deserialize)]
pub struct DonationInput {
    pub amount: f64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Totals over a set of donations, computed on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationSummary {
    pub count: usize,
    pub total_raised: f64,
    pub largest_donation: f64,
    /// Mean amount rounded to the nearest whole unit, zero when empty
    pub average_donation: i64,
}

impl DonationSummary {
    pub fn from_donations<'a, I>(donations: I) -> Self
    where
        I: IntoIterator<Item = &'a Donation>,
    {
        let mut summary = DonationSummary::default();
        for donation in donations {
            summary.count += 1;
            summary.total_raised += donation.amount;
            if donation.amount > summary.largest_donation {
                summary.largest_donation = donation.amount;
            }
        }
        if summary.count > 0 {
            summary.average_donation = (summary.total_raised / summary.count as f64).round() as i64;
        }
        summary
    }
}

/// Overall totals plus the signed-in donor's own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationOverview {
    pub overall: DonationSummary,
    pub mine: DonationSummary,
}
