//! Handlers for the `/articles` resource: consumable stock tracked by the
//! movement ledger.
//!
//! Stock counters are never edited here. `create` seeds the baseline,
//! `record_movement` is the only way `stock_current` changes afterwards, and
//! the `consistency` endpoint audits the counter against the ledger.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use depot_core::access;
use depot_core::article::validate_article_status;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_core::validation::{validate_name, validate_stock_levels};
use depot_db::models::article::{
    Article, ArticleWithCategory, CreateArticle, LedgerCheck, UpdateArticle,
};
use depot_db::models::movement::{CreateMovement, Movement};
use depot_db::repositories::{ArticleRepo, CategoryRepo, MovementRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// CRUD handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/articles
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<Article>)> {
    require(&user, access::OP_ARTICLE_CREATE)?;

    validate_name("code", &input.code)?;
    validate_name("name", &input.name)?;
    validate_stock_levels(input.stock_current, input.stock_min, input.stock_max)?;
    if let Some(status) = &input.status {
        validate_article_status(status)?;
    }
    ensure_category_exists(&state, input.category_id).await?;

    let article = ArticleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/v1/articles
///
/// Lists active articles with their category resolved; pass
/// `?include_inactive=true` to include soft-deactivated rows.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<Json<Vec<ArticleWithCategory>>> {
    let articles = ArticleRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(articles))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ArticleWithCategory>> {
    let article = ArticleRepo::find_by_id_with_category(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "article",
            id,
        }))?;
    Ok(Json(article))
}

/// PUT /api/v1/articles/{id}
///
/// Descriptive fields only. The update DTO cannot express a stock edit.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<Json<Article>> {
    require(&user, access::OP_ARTICLE_UPDATE)?;

    if let Some(code) = &input.code {
        validate_name("code", code)?;
    }
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    if let Some(status) = &input.status {
        validate_article_status(status)?;
    }
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "article",
            id,
        }))?;
    Ok(Json(article))
}

/// DELETE /api/v1/articles/{id}
///
/// Hard delete. Ledger rows reference the article loosely and survive.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require(&user, access::OP_ARTICLE_DELETE)?;

    let deleted = ArticleRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "article",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Ledger handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/articles/{id}/movements
///
/// Record a stock movement. The acting user comes from the JWT, the article
/// from the path. Runs as a single transaction in the repository; on any
/// error no ledger row is written and the counter is untouched.
pub async fn record_movement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateMovement>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    require(&user, access::OP_MOVEMENT_RECORD)?;

    let movement = ArticleRepo::record_movement(&state.pool, id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// GET /api/v1/articles/{id}/movements
///
/// Full movement history of one article, newest first. Still answers after
/// the article itself was deleted, since ledger rows are kept.
pub async fn list_movements(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Movement>>> {
    let movements = MovementRepo::list_by_article(&state.pool, id).await?;
    Ok(Json(movements))
}

/// GET /api/v1/articles/{id}/consistency
///
/// Audit the stock counter against the ledger:
/// `stock_initial + sum(signed quantities) == stock_current`.
pub async fn consistency(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LedgerCheck>>> {
    let check = ArticleRepo::check_ledger(&state.pool, id).await?;
    Ok(Json(DataResponse { data: check }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject with `INVALID_REFERENCE` when the category id points at nothing.
async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Reference {
            entity: "category",
            id: category_id,
        }));
    }
    Ok(())
}
