//! Student profile API endpoints.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::auth::require_role;
use crate::models::{Role, StudentProfile, StudentProfileInput, User};
use crate::AppState;

/// GET /api/students - All student profiles (admin).
pub async fn list_students(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Vec<StudentProfile>> {
    require_role(&user, &[Role::Admin])?;
    success(state.repo.list_student_profiles().await)
}

/// GET /api/students/me - The signed-in student's profile, created on first visit.
pub async fn get_my_student_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<StudentProfile> {
    require_role(&user, &[Role::Student])?;

    if let Some(profile) = state.repo.get_student_profile_by_user_id(&user.id).await {
        return success(profile);
    }

    let profile = StudentProfile::default_for(&user);
    state.repo.save_student_profile(&profile).await;
    tracing::info!(user_id = %user.id, profile_id = %profile.id, "Created student profile");
    success(profile)
}

/// PUT /api/students/me - Replace the signed-in student's profile.
pub async fn update_my_student_profile(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(input): Json<StudentProfileInput>,
) -> ApiResult<StudentProfile> {
    require_role(&user, &[Role::Student])?;

    let existing = state
        .repo
        .get_student_profile_by_user_id(&user.id)
        .await
        .unwrap_or_else(|| StudentProfile::default_for(&user));
    let profile = existing.updated(input)?;
    state.repo.save_student_profile(&profile).await;
    success(profile)
}
