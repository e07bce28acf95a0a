//! Handler for the global `/assignments` log.
//!
//! Assignments are created through `POST /equipment/{id}/assign`; the global
//! view is read-only history across all units.

use axum::extract::{Query, State};
use axum::Json;
use depot_db::models::assignment::{AssignmentQuery, AssignmentWithRefs};
use depot_db::repositories::AssignmentRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/assignments
///
/// Global assignment history with unit and user names resolved. Supports
/// `?equipment_id=&assigned_to=&limit=&offset=`.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<AssignmentWithRefs>>> {
    let assignments = AssignmentRepo::query(&state.pool, &params).await?;
    Ok(Json(assignments))
}
