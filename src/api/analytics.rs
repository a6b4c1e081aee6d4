//! Admin analytics endpoint.

use axum::{extract::State, Extension};

use super::{success, today, ApiResult};
use crate::auth::require_role;
use crate::models::{PortalAnalytics, Role, User};
use crate::AppState;

/// GET /api/analytics - Dashboard aggregates over every collection (admin).
pub async fn get_analytics(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<PortalAnalytics> {
    require_role(&user, &[Role::Admin])?;

    let repo = &state.repo;
    let analytics = PortalAnalytics::compute(
        &repo.list_alumni_profiles().await,
        &repo.list_student_profiles().await,
        &repo.list_events().await,
        &repo.list_mentorship_requests().await,
        &repo.list_donations().await,
        today(),
    );
    success(analytics)
}
