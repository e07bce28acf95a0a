//! Handlers for the `/areas` reference store.
//!
//! Mirrors the category handlers: admin-only mutations, and deletion is
//! refused while equipment is still installed in the area.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_core::validation::validate_name;
use depot_db::models::area::{Area, CreateArea, UpdateArea};
use depot_db::repositories::{AreaRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/areas
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateArea>,
) -> AppResult<(StatusCode, Json<Area>)> {
    validate_name("name", &input.name)?;
    if let Some(user_id) = input.responsible_user_id {
        ensure_user_exists(&state, user_id).await?;
    }
    let area = AreaRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

/// GET /api/v1/areas
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Area>>> {
    let areas = AreaRepo::list(&state.pool).await?;
    Ok(Json(areas))
}

/// GET /api/v1/areas/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Area>> {
    let area = AreaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "area", id }))?;
    Ok(Json(area))
}

/// PUT /api/v1/areas/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArea>,
) -> AppResult<Json<Area>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(user_id) = input.responsible_user_id {
        ensure_user_exists(&state, user_id).await?;
    }
    let area = AreaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "area", id }))?;
    Ok(Json(area))
}

/// DELETE /api/v1/areas/{id}
///
/// Refused with 409 while any equipment is still installed in the area.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let equipment_count = AreaRepo::count_equipment(&state.pool, id).await?;
    if equipment_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Area {id} still contains {equipment_count} equipment unit(s)"
        ))));
    }

    let deleted = AreaRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "area", id }))
    }
}

/// Reject with `INVALID_REFERENCE` when the responsible user does not exist.
async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    if !UserRepo::exists(&state.pool, user_id).await? {
        return Err(AppError::Core(CoreError::Reference {
            entity: "user",
            id: user_id,
        }));
    }
    Ok(())
}
