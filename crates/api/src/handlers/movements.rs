//! Handlers for the global `/movements` ledger view.
//!
//! Movements are created through `POST /articles/{id}/movements`; this module
//! only lists the ledger across articles and lets the descriptive fields of a
//! row be corrected. `movement_type`, `quantity`, and the captured stock
//! snapshot are frozen at insert time.

use axum::extract::{Path, Query, State};
use axum::Json;
use depot_core::access;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_core::validation::{validate_required, validate_text};
use depot_db::models::movement::{Movement, MovementQuery, MovementWithRefs, UpdateMovement};
use depot_db::repositories::MovementRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require;
use crate::state::AppState;

/// GET /api/v1/movements
///
/// Global ledger with article and actor names resolved. Supports
/// `?article_id=&movement_type=&user_id=&from=&to=&limit=&offset=`.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MovementQuery>,
) -> AppResult<Json<Vec<MovementWithRefs>>> {
    let movements = MovementRepo::query(&state.pool, &params).await?;
    Ok(Json(movements))
}

/// PUT /api/v1/movements/{id}
///
/// Correct descriptive fields (reason, reference, locations, notes). The
/// update DTO cannot express quantity, type, or stock snapshot changes.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovement>,
) -> AppResult<Json<Movement>> {
    require(&user, access::OP_MOVEMENT_UPDATE)?;

    if let Some(reason) = &input.reason {
        validate_required("reason", reason)?;
        validate_text("reason", reason)?;
    }
    if let Some(notes) = &input.notes {
        validate_text("notes", notes)?;
    }

    let movement = MovementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "movement",
            id,
        }))?;
    Ok(Json(movement))
}
