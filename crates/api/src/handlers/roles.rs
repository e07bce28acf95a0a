//! Handler for the read-only `/roles` resource.
//!
//! Roles are seed data; creation and editing are not exposed.

use axum::extract::State;
use axum::Json;
use depot_db::models::role::Role;
use depot_db::repositories::RoleRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/roles
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Role>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(roles))
}
