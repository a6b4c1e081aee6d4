//! REST API module.
//!
//! Each handler performs one dashboard action against the repositories.

mod alumni;
mod analytics;
mod donations;
mod events;
mod mentorship;
mod session;
mod students;
mod users;

pub use alumni::*;
pub use analytics::*;
pub use donations::*;
pub use events::*;
pub use mentorship::*;
pub use session::*;
pub use students::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Calendar date used to split upcoming from past events.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
