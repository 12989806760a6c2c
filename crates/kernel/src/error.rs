//! Application error types.
//!
//! `RestaurantNotFound` and `MenuUnavailable` stay distinct in the taxonomy
//! but map to one identical 404 response, so the public surface never
//! reveals whether a slug exists.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Another tenant already uses this restaurant name.
    #[error("restaurant name is already taken")]
    NameConflict,

    /// No tenant exists under the requested slug.
    #[error("restaurant not found")]
    RestaurantNotFound,

    /// The slug exists but the menu is not published (public path only).
    #[error("menu unavailable")]
    MenuUnavailable,

    /// Malformed menu or settings payload; nothing was applied.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Backend write failed; the cached state was not advanced.
    #[error("storage error")]
    Persistence(#[source] anyhow::Error),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NameConflict => StatusCode::CONFLICT,
            AppError::RestaurantNotFound | AppError::MenuUnavailable => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Persistence(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Details go to the log, never to the client
        let body = match &self {
            AppError::Persistence(e) => {
                tracing::error!(error = %e, "storage error");
                "internal server error".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            // One generic body for both 404 causes
            AppError::RestaurantNotFound | AppError::MenuUnavailable => {
                "menu unavailable".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
