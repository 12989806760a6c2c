//! Owner dashboard API routes.
//!
//! Every route here requires an authenticated owner; the bearer middleware
//! is attached as a route layer, so the handlers can rely on the
//! [`OwnerAuth`] extension being present.

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::{OwnerAuth, require_owner};
use crate::models::branding::Branding;
use crate::models::menu::Menu;
use crate::models::restaurant::{RestaurantSettings, RestaurantStatus, StatusChange};
use crate::service::DashboardView;
use crate::state::AppState;

/// Create the dashboard router with the owner-auth layer applied.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/menu", put(put_menu))
        .route("/api/dashboard/branding", put(put_branding))
        .route("/api/dashboard/settings", put(put_settings))
        .route("/api/dashboard/status", post(post_status))
        .route("/api/dashboard/name-check", get(name_check))
        .route_layer(axum::middleware::from_fn_with_state(state, require_owner))
}

// -------------------------------------------------------------------------
// Response types
// -------------------------------------------------------------------------

#[derive(Serialize)]
struct StatusResponse {
    status: RestaurantStatus,
}

#[derive(Serialize)]
struct NameCheckResponse {
    unique: bool,
}

// -------------------------------------------------------------------------
// Request types
// -------------------------------------------------------------------------

#[derive(Deserialize)]
struct NameCheckParams {
    name: String,
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
) -> AppResult<Json<DashboardView>> {
    let view = state.menus().load_dashboard(&auth.owner_id).await?;
    Ok(Json(view))
}

async fn put_menu(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Json(menu): Json<Menu>,
) -> AppResult<Json<Menu>> {
    let saved = state.menus().save_menu_content(&auth.owner_id, menu).await?;
    Ok(Json(saved))
}

async fn put_branding(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Json(branding): Json<Branding>,
) -> AppResult<Json<Branding>> {
    let merged = state
        .menus()
        .save_design_customization(&auth.owner_id, branding)
        .await?;
    Ok(Json(merged))
}

async fn put_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Json(settings): Json<RestaurantSettings>,
) -> AppResult<Json<DashboardView>> {
    let view = state
        .menus()
        .save_restaurant_settings(&auth.owner_id, settings)
        .await?;
    Ok(Json(view))
}

async fn post_status(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Json(change): Json<StatusChange>,
) -> AppResult<Json<StatusResponse>> {
    let status = state
        .menus()
        .update_menu_status(&auth.owner_id, change.status)
        .await?;
    Ok(Json(StatusResponse { status }))
}

async fn name_check(
    State(state): State<AppState>,
    Extension(auth): Extension<OwnerAuth>,
    Query(params): Query<NameCheckParams>,
) -> AppResult<Json<NameCheckResponse>> {
    let unique = state
        .menus()
        .is_name_unique(&params.name, &auth.owner_id)
        .await;
    Ok(Json(NameCheckResponse { unique }))
}
