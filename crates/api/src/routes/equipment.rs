//! Route definitions for the `/equipment` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::equipment;
use crate::state::AppState;

/// Routes mounted at `/equipment`.
///
/// ```text
/// GET    /                   -> list (?status, ?area_id, ?include_inactive)
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id (area and holder resolved)
/// PUT    /{id}               -> update (direct edits, unguarded status)
/// DELETE /{id}               -> delete
/// POST   /{id}/assign        -> assign (history row + in_use)
/// GET    /{id}/assignments   -> list_assignments
/// POST   /{id}/maintenance   -> report_maintenance (record + in_maintenance)
/// GET    /{id}/maintenance   -> maintenance_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(equipment::list).post(equipment::create))
        .route(
            "/{id}",
            get(equipment::get_by_id)
                .put(equipment::update)
                .delete(equipment::delete),
        )
        .route("/{id}/assign", post(equipment::assign))
        .route("/{id}/assignments", get(equipment::list_assignments))
        .route(
            "/{id}/maintenance",
            get(equipment::maintenance_history).post(equipment::report_maintenance),
        )
}
