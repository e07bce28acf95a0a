//! Repository for the `articles` table and the stock movement engine.
//!
//! `record_movement` is the only write path for `articles.stock_current`.
//! It runs as a single transaction with the article row locked, so two
//! concurrent movements on the same article serialize and the counter can
//! never drift from the ledger.

use sqlx::PgPool;

use depot_core::article::{self, MovementType};
use depot_core::types::DbId;
use depot_core::validation::validate_required;
use depot_core::CoreError;

use crate::error::DbError;
use crate::models::article::{
    Article, ArticleWithCategory, CreateArticle, LedgerCheck, UpdateArticle,
};
use crate::models::movement::{CreateMovement, Movement};
use crate::repositories::movement_repo::{self, MovementRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, description, serial_number, stock_initial, \
    stock_current, stock_min, stock_max, location, status, is_active, category_id, \
    created_at, updated_at";

/// Column list for the category-resolved view.
const WITH_CATEGORY_COLUMNS: &str = "a.id, a.code, a.name, a.description, a.serial_number, \
    a.stock_initial, a.stock_current, a.stock_min, a.stock_max, a.location, a.status, \
    a.is_active, a.category_id, c.name AS category_name, a.created_at, a.updated_at";

/// Provides CRUD operations for articles plus the transactional ledger
/// engine.
pub struct ArticleRepo;

impl ArticleRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new article. The supplied stock becomes both `stock_initial`
    /// and `stock_current`; no movement row is written for the baseline.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (code, name, description, serial_number, stock_initial, stock_current,
                 stock_min, stock_max, location, status, category_id)
             VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, COALESCE($9, 'available'), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.serial_number)
            .bind(input.stock_current)
            .bind(input.stock_min)
            .bind(input.stock_max)
            .bind(&input.location)
            .bind(&input.status)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find an article by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an article by its unique code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE code = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Find an article by ID with the category name resolved.
    pub async fn find_by_id_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArticleWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_CATEGORY_COLUMNS} FROM articles a
             JOIN categories c ON a.category_id = c.id
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List articles with category names, ordered by code. Inactive articles
    /// are excluded unless `include_inactive` is set.
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
    ) -> Result<Vec<ArticleWithCategory>, sqlx::Error> {
        let filter = if include_inactive {
            ""
        } else {
            "WHERE a.is_active = true"
        };
        let query = format!(
            "SELECT {WITH_CATEGORY_COLUMNS} FROM articles a
             JOIN categories c ON a.category_id = c.id
             {filter}
             ORDER BY a.code ASC"
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// List active articles at or below their minimum stock level.
    pub async fn low_stock(pool: &PgPool) -> Result<Vec<ArticleWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_CATEGORY_COLUMNS} FROM articles a
             JOIN categories c ON a.category_id = c.id
             WHERE a.is_active = true AND a.stock_current <= a.stock_min
             ORDER BY a.stock_current ASC, a.code ASC"
        );
        sqlx::query_as::<_, ArticleWithCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Only non-`None` fields in `input` are applied.
    /// The stock counter is not updatable here; see [`Self::record_movement`].
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                serial_number = COALESCE($5, serial_number),
                stock_min = COALESCE($6, stock_min),
                stock_max = COALESCE($7, stock_max),
                location = COALESCE($8, location),
                status = COALESCE($9, status),
                is_active = COALESCE($10, is_active),
                category_id = COALESCE($11, category_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.serial_number)
            .bind(input.stock_min)
            .bind(input.stock_max)
            .bind(&input.location)
            .bind(&input.status)
            .bind(input.is_active)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an article. Returns `true` if a row was removed.
    ///
    /// Movements referencing the article are left in place (loose refs).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Ledger engine ────────────────────────────────────────────────

    /// Record a stock movement atomically.
    ///
    /// Inside one transaction: lock the article row, capture `stock_before`,
    /// compute `stock_after` (rejecting an exit into negative stock), insert
    /// the ledger row with the captured snapshot, and update the counter.
    /// On any failure the transaction rolls back and nothing is observable.
    pub async fn record_movement(
        pool: &PgPool,
        article_id: DbId,
        actor_id: DbId,
        input: &CreateMovement,
    ) -> Result<Movement, DbError> {
        let movement_type = MovementType::from_str(&input.movement_type)?;
        article::validate_quantity(movement_type, input.quantity)?;
        validate_required("reason", &input.reason)?;

        let mut tx = pool.begin().await?;

        // Row lock: concurrent movements on the same article serialize here.
        let locked: Option<(i32,)> =
            sqlx::query_as("SELECT stock_current FROM articles WHERE id = $1 FOR UPDATE")
                .bind(article_id)
                .fetch_optional(&mut *tx)
                .await?;

        let stock_before = match locked {
            Some((stock,)) => stock,
            None => {
                return Err(CoreError::NotFound {
                    entity: "article",
                    id: article_id,
                }
                .into())
            }
        };

        let actor_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(actor_id)
                .fetch_one(&mut *tx)
                .await?;
        if !actor_exists {
            return Err(CoreError::Reference {
                entity: "user",
                id: actor_id,
            }
            .into());
        }

        let stock_after = article::stock_after(stock_before, movement_type, input.quantity)?;

        let insert = format!(
            "INSERT INTO movements
                (article_id, user_id, movement_type, quantity, stock_before, stock_after,
                 reason, reference, origin_location, destination_location, assigned_to,
                 received_by, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {}",
            movement_repo::COLUMNS
        );
        let movement = sqlx::query_as::<_, Movement>(&insert)
            .bind(article_id)
            .bind(actor_id)
            .bind(movement_type.as_str())
            .bind(input.quantity)
            .bind(stock_before)
            .bind(stock_after)
            .bind(&input.reason)
            .bind(&input.reference)
            .bind(&input.origin_location)
            .bind(&input.destination_location)
            .bind(&input.assigned_to)
            .bind(&input.received_by)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        // Neutral movement types leave the counter (and updated_at) alone.
        if movement_type.affects_stock() {
            sqlx::query("UPDATE articles SET stock_current = $2 WHERE id = $1")
                .bind(article_id)
                .bind(stock_after)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(movement)
    }

    /// Audit an article's ledger against its stock counter:
    /// `stock_current` must equal `stock_initial` plus the signed sum of its
    /// movements.
    pub async fn check_ledger(pool: &PgPool, article_id: DbId) -> Result<LedgerCheck, DbError> {
        let article = Self::find_by_id(pool, article_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "article",
                id: article_id,
            })?;

        let movement_sum = MovementRepo::signed_sum(pool, article_id).await?;
        let expected_stock = i64::from(article.stock_initial) + movement_sum;

        Ok(LedgerCheck {
            article_id,
            stock_initial: article.stock_initial,
            stock_current: article.stock_current,
            movement_sum,
            expected_stock,
            consistent: expected_stock == i64::from(article.stock_current),
        })
    }
}
