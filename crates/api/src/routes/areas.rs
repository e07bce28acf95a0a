//! Route definitions for the `/areas` reference store.

use axum::routing::get;
use axum::Router;

use crate::handlers::areas;
use crate::state::AppState;

/// Routes mounted at `/areas`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (admin)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (admin)
/// DELETE /{id}    -> delete (admin, refused while referenced)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(areas::list).post(areas::create))
        .route(
            "/{id}",
            get(areas::get_by_id).put(areas::update).delete(areas::delete),
        )
}
