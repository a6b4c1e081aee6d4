//! Mentorship request API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::alumni::own_alumni_profile;
use super::{success, ApiResult};
use crate::auth::require_role;
use crate::errors::AppError;
use crate::models::{
    CreateMentorshipRequest, MentorshipRequest, MentorshipStatusUpdate, Role, User,
};
use crate::AppState;

/// GET /api/mentorship - Requests visible to the signed-in user.
///
/// Students see what they sent, alumni what was sent to their profile, admins everything.
pub async fn list_mentorship_requests(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Vec<MentorshipRequest>> {
    let requests = match user.role {
        Role::Student => state.repo.list_mentorship_requests_by_student(&user.id).await,
        Role::Alumni => match state.repo.get_alumni_profile_by_user_id(&user.id).await {
            Some(profile) => state.repo.list_mentorship_requests_for_alumni(&profile.id).await,
            None => Vec::new(),
        },
        Role::Admin => state.repo.list_mentorship_requests().await,
    };
    success(requests)
}

/// POST /api/mentorship - Ask an available mentor for mentorship (student).
pub async fn create_mentorship_request(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateMentorshipRequest>,
) -> ApiResult<MentorshipRequest> {
    require_role(&user, &[Role::Student])?;

    let mentor = state
        .repo
        .get_alumni_profile(&request.alumni_id)
        .await
        .ok_or_else(|| {
            AppError::NotFound(format!("Alumni profile {} not found", request.alumni_id))
        })?;
    if !mentor.is_available_mentor() {
        return Err(AppError::Validation(format!(
            "{} is not accepting mentorship requests",
            mentor.name
        )));
    }

    let student_profile = state.repo.get_student_profile_by_user_id(&user.id).await;
    let created =
        MentorshipRequest::new(&user, student_profile.as_ref(), &mentor, &request.message)?;
    state.repo.save_mentorship_request(&created).await;
    tracing::info!(
        request_id = %created.id,
        alumni_id = %mentor.id,
        "Mentorship request sent"
    );
    success(created)
}

/// PUT /api/mentorship/:id/status - Approve or reject a request.
///
/// Allowed for the alumnus the request targets, and for admins.
pub async fn update_mentorship_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(update): Json<MentorshipStatusUpdate>,
) -> ApiResult<MentorshipRequest> {
    require_role(&user, &[Role::Alumni, Role::Admin])?;

    let existing = state
        .repo
        .get_mentorship_request(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Mentorship request {} not found", id)))?;

    if user.role == Role::Alumni {
        let profile = own_alumni_profile(&state, &user).await?;
        if existing.alumni_id != profile.id {
            return Err(AppError::Forbidden(
                "Request is addressed to another alumnus".to_string(),
            ));
        }
    }

    let updated = state
        .repo
        .update_mentorship_status(&id, update.status)
        .await?;
    tracing::info!(request_id = %id, status = updated.status.as_str(), "Mentorship request reviewed");
    success(updated)
}
