//! Bearer token owner authentication middleware.
//!
//! Resolves `Authorization: Bearer <token>` through the configured
//! [`AuthProvider`](crate::auth::AuthProvider) and sets the owner context.
//! Applied as a route layer on the dashboard and preview routes, so a
//! missing or unknown token is a hard 401 there — the anonymous public
//! route never sees this middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::models::restaurant::OwnerId;
use crate::state::AppState;

/// Owner identity extracted from a valid bearer token.
#[derive(Debug, Clone)]
pub struct OwnerAuth {
    pub owner_id: OwnerId,
}

/// Middleware requiring an authenticated owner.
pub async fn require_owner(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AppError::Unauthorized.into_response();
    };

    let Some(owner_id) = state.auth().resolve(token).await else {
        debug!("bearer token authenticates no owner");
        return AppError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(OwnerAuth { owner_id });
    next.run(request).await
}
