//! Route definitions for the `/articles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// ```text
/// GET    /                   -> list (?include_inactive)
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id (category resolved)
/// PUT    /{id}               -> update (descriptive fields only)
/// DELETE /{id}               -> delete
/// POST   /{id}/movements     -> record_movement
/// GET    /{id}/movements     -> list_movements
/// GET    /{id}/consistency   -> consistency (ledger-vs-counter audit)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(articles::list).post(articles::create))
        .route(
            "/{id}",
            get(articles::get_by_id)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route(
            "/{id}/movements",
            get(articles::list_movements).post(articles::record_movement),
        )
        .route("/{id}/consistency", get(articles::consistency))
}
