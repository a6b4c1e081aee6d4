//! Sign-in by email and role.
//!
//! There is no credential check: any email/role pair signs in, creating the account on
//! first use. The session layer only requires that someone is signed in.

use std::sync::Arc;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::db::{Repository, Session};
use crate::errors::AppError;
use crate::models::{Role, User};

/// Look up or create the account for `(email, role)` and make it the current user.
pub async fn login(
    repo: &Repository,
    session: &Session,
    email: &str,
    role: Role,
) -> Result<User, AppError> {
    let user = repo.find_or_create_user(email, role).await?;
    session.set_current_user(Some(&user)).await;
    tracing::info!(user_id = %user.id, role = role.as_str(), "User signed in");
    Ok(user)
}

pub async fn logout(session: &Session) {
    session.set_current_user(None).await;
    tracing::info!("User signed out");
}

pub async fn is_authenticated(session: &Session) -> bool {
    session.get_current_user().await.is_some()
}

pub async fn has_role(session: &Session, role: Role) -> bool {
    session
        .get_current_user()
        .await
        .is_some_and(|user| user.role == role)
}

/// Reject the action unless `user` holds one of `allowed`.
pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Action not available to {} accounts",
            user.role.as_str()
        )))
    }
}

/// Session layer: requires a current user and hands it to handlers as an extension.
pub async fn session_layer(session: Arc<Session>, mut request: Request, next: Next) -> Response {
    match session.get_current_user().await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => AppError::Unauthorized("Sign in required".to_string()).into_response(),
    }
}
