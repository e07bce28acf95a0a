//! Route definition for the global `/assignments` log.

use axum::routing::get;
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// GET /    -> list (filterable, names resolved)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(assignments::list))
}
