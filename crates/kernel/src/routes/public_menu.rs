//! Public menu and preview routes.
//!
//! The anonymous route serves Active menus only and returns one generic
//! 404 for unknown slugs and unpublished menus alike. The preview route
//! carries the owner-auth layer and bypasses the publication gate for the
//! owner's own slug.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::get,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::locale::preferred_language;
use crate::middleware::{OwnerAuth, require_owner};
use crate::service::PublicView;
use crate::state::AppState;

/// Create the public menu router; the preview route gets the auth layer.
pub fn router(state: AppState) -> Router<AppState> {
    let preview = Router::new()
        .route("/api/menu/{slug}/preview", get(get_preview))
        .route_layer(axum::middleware::from_fn_with_state(state, require_owner));

    Router::new()
        .route("/api/menu/{slug}", get(get_public_menu))
        .merge(preview)
}

#[derive(Deserialize)]
struct LanguageParams {
    lang: Option<String>,
}

/// Pick the display language from the query and the Accept-Language header.
fn display_language(state: &AppState, params: &LanguageParams, headers: &HeaderMap) -> String {
    let accept = headers
        .get("accept-language")
        .and_then(|v| v.to_str().ok());
    preferred_language(
        params.lang.as_deref(),
        accept,
        state.menus().default_language(),
    )
}

async fn get_public_menu(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LanguageParams>,
    headers: HeaderMap,
) -> AppResult<Json<PublicView>> {
    let language = display_language(&state, &params, &headers);
    let view = state.menus().load_public(&slug, &language).await?;
    Ok(Json(view))
}

async fn get_preview(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Path(slug): Path<String>,
    Query(params): Query<LanguageParams>,
    headers: HeaderMap,
) -> AppResult<Json<PublicView>> {
    let language = display_language(&state, &params, &headers);
    let view = state
        .menus()
        .load_preview(&auth.owner_id, &slug, &language)
        .await?;
    Ok(Json(view))
}
