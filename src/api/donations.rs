//! Donation API endpoints.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::models::{Donation, DonationInput, DonationOverview, DonationSummary, User};
use crate::AppState;

/// GET /api/donations - All donations, oldest first.
pub async fn list_donations(State(state): State<AppState>) -> ApiResult<Vec<Donation>> {
    success(state.repo.list_donations().await)
}

/// POST /api/donations - Record a donation by the signed-in user.
pub async fn create_donation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(input): Json<DonationInput>,
) -> ApiResult<Donation> {
    let profile = state.repo.get_alumni_profile_by_user_id(&user.id).await;
    let donation = Donation::new(input, &user, profile.as_ref().map(|p| p.name.as_str()))?;
    state.repo.save_donation(&donation).await;
    tracing::info!(
        donation_id = %donation.id,
        amount = donation.amount,
        "Donation recorded"
    );
    success(donation)
}

/// GET /api/donations/summary - Overall totals and the signed-in user's own.
pub async fn donation_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<DonationOverview> {
    let donations = state.repo.list_donations().await;
    let overall = DonationSummary::from_donations(&donations);
    let mine = DonationSummary::from_donations(donations.iter().filter(|d| d.donor_id == user.id));
    success(DonationOverview { overall, mine })
}
