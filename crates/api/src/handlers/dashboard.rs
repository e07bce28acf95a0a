//! Handlers for the `/dashboard` aggregate views feeding reports and the
//! landing page. Read-only; every endpoint requires authentication.

use axum::extract::State;
use axum::Json;
use depot_db::models::article::ArticleWithCategory;
use depot_db::models::dashboard::DashboardSummary;
use depot_db::repositories::{ArticleRepo, DashboardRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/summary
///
/// Aggregate counts: articles, low-stock articles, equipment by status, open
/// maintenance, and ledger activity over the last seven days.
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = DashboardRepo::summary(&state.pool).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/dashboard/low-stock
///
/// Active articles at or below their minimum stock level, most urgent first.
pub async fn low_stock(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ArticleWithCategory>>>> {
    let articles = ArticleRepo::low_stock(&state.pool).await?;
    Ok(Json(DataResponse { data: articles }))
}
