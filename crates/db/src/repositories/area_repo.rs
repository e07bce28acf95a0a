//! Repository for the `areas` table.

use sqlx::PgPool;

use depot_core::types::DbId;

use crate::models::area::{Area, CreateArea, UpdateArea};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, responsible_user_id, created_at, updated_at";

/// Provides CRUD operations for areas.
pub struct AreaRepo;

impl AreaRepo {
    /// Insert a new area, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArea) -> Result<Area, sqlx::Error> {
        let query = format!(
            "INSERT INTO areas (name, description, responsible_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.responsible_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an area by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Area>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM areas WHERE id = $1");
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an area by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Area>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM areas WHERE name = $1");
        sqlx::query_as::<_, Area>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all areas ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Area>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM areas ORDER BY name ASC");
        sqlx::query_as::<_, Area>(&query).fetch_all(pool).await
    }

    /// Update an area. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArea,
    ) -> Result<Option<Area>, sqlx::Error> {
        let query = format!(
            "UPDATE areas SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                responsible_user_id = COALESCE($4, responsible_user_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Area>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.responsible_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an area. Returns `true` if a row was removed.
    ///
    /// Callers must check [`Self::count_equipment`] first; the foreign key on
    /// `equipment.area_id` backstops the guard.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM areas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count equipment referencing this area (active or not).
    pub async fn count_equipment(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM equipment WHERE area_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
