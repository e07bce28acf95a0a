//! Route definitions for the `/dashboard` aggregate views.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /summary      -> summary (aggregate counts)
/// GET /low-stock    -> low_stock (articles at or below minimum)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(dashboard::summary))
        .route("/low-stock", get(dashboard::low_stock))
}
