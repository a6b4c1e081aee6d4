//! User API endpoints.

use axum::{extract::State, Extension};

use super::{success, ApiResult};
use crate::auth::require_role;
use crate::models::{Role, User};
use crate::AppState;

/// GET /api/users - List all accounts (admin).
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<Vec<User>> {
    require_role(&user, &[Role::Admin])?;
    success(state.repo.list_users().await)
}
