//! Alumni profile API endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::require_role;
use crate::errors::AppError;
use crate::models::{
    AlumniDirectory, AlumniDirectoryQuery, AlumniProfile, AlumniProfileInput, ApprovalRequest,
    Role, User,
};
use crate::AppState;

/// GET /api/alumni - Search the directory of approved alumni.
pub async fn search_alumni(
    State(state): State<AppState>,
    Query(query): Query<AlumniDirectoryQuery>,
) -> ApiResult<AlumniDirectory> {
    success(state.repo.search_alumni(&query).await)
}

/// GET /api/alumni/all - Every profile including pending ones (admin).
pub async fn list_all_alumni(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Vec<AlumniProfile>> {
    require_role(&user, &[Role::Admin])?;
    success(state.repo.list_alumni_profiles().await)
}

/// GET /api/alumni/mentors - Approved alumni accepting mentees.
pub async fn list_mentors(State(state): State<AppState>) -> ApiResult<Vec<AlumniProfile>> {
    success(state.repo.list_available_mentors().await)
}

/// GET /api/alumni/me - The signed-in alumnus's profile, created on first visit.
pub async fn get_my_alumni_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<AlumniProfile> {
    require_role(&user, &[Role::Alumni])?;

    if let Some(profile) = state.repo.get_alumni_profile_by_user_id(&user.id).await {
        return success(profile);
    }

    let profile = AlumniProfile::default_for(&user);
    state.repo.save_alumni_profile(&profile).await;
    tracing::info!(user_id = %user.id, profile_id = %profile.id, "Created alumni profile");
    success(profile)
}

/// PUT /api/alumni/me - Replace the signed-in alumnus's profile.
pub async fn update_my_alumni_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(input): Json<AlumniProfileInput>,
) -> ApiResult<AlumniProfile> {
    require_role(&user, &[Role::Alumni])?;

    let existing = state
        .repo
        .get_alumni_profile_by_user_id(&user.id)
        .await
        .unwrap_or_else(|| AlumniProfile::default_for(&user));
    let profile = existing.updated(input)?;
    state.repo.save_alumni_profile(&profile).await;
    success(profile)
}

/// PUT /api/alumni/:id/approval - Approve or reject a profile (admin).
pub async fn set_alumni_approval(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(request): Json<ApprovalRequest>,
) -> ApiResult<AlumniProfile> {
    require_role(&user, &[Role::Admin])?;

    let profile = state.repo.set_alumni_approval(&id, request.approve).await?;
    success(profile)
}

/// Profile for the signed-in alumnus, or 404 when they have not created one.
pub(crate) async fn own_alumni_profile(
    state: &AppState,
    user: &User,
) -> Result<AlumniProfile, AppError> {
    state
        .repo
        .get_alumni_profile_by_user_id(&user.id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No alumni profile for user {}", user.id)))
}
