//! Session API endpoints. These run without the session layer.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::auth;
use crate::models::{LoginRequest, User};
use crate::AppState;

/// GET /api/session - Current user, or null when signed out.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<Option<User>> {
    success(state.session.get_current_user().await)
}

/// POST /api/session - Sign in by email and role.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<User> {
    let user = auth::login(&state.repo, &state.session, &request.email, request.role).await?;
    success(user)
}

/// POST /api/session/logout - Clear the current user.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    auth::logout(&state.session).await;
    success(())
}
