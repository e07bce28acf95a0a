//! Handlers for the `/categories` reference store.
//!
//! Mutations are admin-only. Deleting a category that still has articles is
//! refused so every article keeps a resolvable category.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use depot_core::error::CoreError;
use depot_core::types::DbId;
use depot_core::validation::validate_name;
use depot_db::models::category::{Category, CreateCategory, UpdateCategory};
use depot_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_name("name", &input.name)?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Category>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id,
        }))?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &input.name {
        validate_name("name", name)?;
    }
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while any article still references the category. The
/// foreign key backs this check up against races.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let article_count = CategoryRepo::count_articles(&state.pool, id).await?;
    if article_count > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Category {id} is still referenced by {article_count} article(s)"
        ))));
    }

    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "category",
            id,
        }))
    }
}
