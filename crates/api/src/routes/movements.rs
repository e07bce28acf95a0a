//! Route definitions for the global `/movements` ledger.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::movements;
use crate::state::AppState;

/// Routes mounted at `/movements`.
///
/// ```text
/// GET /        -> list (filterable, names resolved)
/// PUT /{id}    -> update (descriptive fields only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movements::list))
        .route("/{id}", put(movements::update))
}
