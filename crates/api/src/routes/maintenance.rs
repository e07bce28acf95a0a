//! Route definitions for the global `/maintenance` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET    /        -> list (filterable, names resolved)
/// PUT    /{id}    -> update (status side effects apply)
/// DELETE /{id}    -> delete (admin only, no status revert)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance::list))
        .route(
            "/{id}",
            put(maintenance::update).delete(maintenance::delete),
        )
}
