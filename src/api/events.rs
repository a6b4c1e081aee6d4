//! Event API endpoints.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::{success, today, ApiResult};
use crate::auth::require_role;
use crate::errors::AppError;
use crate::models::{Event, EventInput, EventListQuery, Role, User};
use crate::AppState;

/// GET /api/events - List events, optionally only upcoming or past ones.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> ApiResult<Vec<Event>> {
    success(state.repo.list_events_filtered(query.filter, today()).await)
}

/// POST /api/events - Create an event (admin).
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(input): Json<EventInput>,
) -> ApiResult<Event> {
    require_role(&user, &[Role::Admin])?;

    let event = Event::from_input(input, &user.id)?;
    state.repo.save_event(&event).await;
    tracing::info!(event_id = %event.id, "Event created");
    success(event)
}

/// PUT /api/events/:id - Edit an event (admin).
pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(input): Json<EventInput>,
) -> ApiResult<Event> {
    require_role(&user, &[Role::Admin])?;

    let existing = state
        .repo
        .get_event(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))?;
    let event = existing.updated(input)?;
    state.repo.save_event(&event).await;
    success(event)
}

/// DELETE /api/events/:id - Delete an event (admin).
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_role(&user, &[Role::Admin])?;

    if !state.repo.delete_event(&id).await {
        return Err(AppError::NotFound(format!("Event {} not found", id)));
    }
    success(())
}

/// POST /api/events/:id/rsvp - Toggle the signed-in user's RSVP.
pub async fn toggle_rsvp(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> ApiResult<Event> {
    let event = state.repo.toggle_rsvp(&id, &user.id).await?;
    success(event)
}
