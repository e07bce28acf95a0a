//! Repository for the `movements` table (the article stock ledger).
//!
//! Movements are inserted exclusively by `ArticleRepo::record_movement`;
//! this repository only reads the ledger and patches descriptive fields.

use sqlx::PgPool;

use depot_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use depot_core::types::{DbId, Timestamp};

use crate::models::movement::{Movement, MovementQuery, MovementWithRefs, UpdateMovement};

/// Column list shared across queries to avoid repetition. `pub(crate)` so the
/// article engine can reuse it for its `INSERT ... RETURNING`.
pub(crate) const COLUMNS: &str = "id, article_id, user_id, movement_type, quantity, \
    stock_before, stock_after, reason, reference, origin_location, \
    destination_location, assigned_to, received_by, notes, created_at";

/// Column list for the resolved ledger view. LEFT JOINs because article and
/// user references are loose and may dangle after hard deletes.
const WITH_REFS_COLUMNS: &str = "m.id, m.article_id, m.user_id, m.movement_type, m.quantity, \
    m.stock_before, m.stock_after, m.reason, m.reference, m.origin_location, \
    m.destination_location, m.assigned_to, m.received_by, m.notes, m.created_at, \
    a.code AS article_code, a.name AS article_name, u.username AS actor_username";

/// Provides read and descriptive-update operations for stock movements.
pub struct MovementRepo;

impl MovementRepo {
    /// Find a movement by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movements WHERE id = $1");
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all movements for one article, newest first.
    pub async fn list_by_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<Movement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movements
             WHERE article_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Query the global ledger with filtering and pagination, newest first.
    pub async fn query(
        pool: &PgPool,
        params: &MovementQuery,
    ) -> Result<Vec<MovementWithRefs>, sqlx::Error> {
        let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(params.offset);

        let (where_clause, bind_values, bind_idx) = build_movement_filter(params);

        let query = format!(
            "SELECT {WITH_REFS_COLUMNS} FROM movements m
             LEFT JOIN articles a ON m.article_id = a.id
             LEFT JOIN users u ON m.user_id = u.id
             {where_clause}
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_movement_values(sqlx::query_as::<_, MovementWithRefs>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count movements matching the given filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &MovementQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_movement_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM movements m {where_clause}");

        let q = bind_movement_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Update a movement's descriptive fields. Quantity, type, and the stock
    /// snapshot are frozen at insert time and cannot be touched here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovement,
    ) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!(
            "UPDATE movements SET
                reason = COALESCE($2, reason),
                reference = COALESCE($3, reference),
                origin_location = COALESCE($4, origin_location),
                destination_location = COALESCE($5, destination_location),
                assigned_to = COALESCE($6, assigned_to),
                received_by = COALESCE($7, received_by),
                notes = COALESCE($8, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .bind(&input.reason)
            .bind(&input.reference)
            .bind(&input.origin_location)
            .bind(&input.destination_location)
            .bind(&input.assigned_to)
            .bind(&input.received_by)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Sum of signed movement quantities for an article: entries count
    /// positive, exits negative, everything else zero.
    pub async fn signed_sum(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(
                CASE movement_type
                    WHEN 'entry' THEN quantity
                    WHEN 'exit' THEN -quantity
                    ELSE 0
                END
             ), 0)::BIGINT
             FROM movements WHERE article_id = $1",
        )
        .bind(article_id)
        .fetch_one(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built ledger queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from `MovementQuery` filter
/// parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The
/// `where_clause` is empty if no filters are active, or starts with `WHERE `.
/// Column references are prefixed with the `m.` alias.
fn build_movement_filter(params: &MovementQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(article_id) = params.article_id {
        conditions.push(format!("m.article_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(article_id));
    }

    if let Some(ref movement_type) = params.movement_type {
        conditions.push(format!("m.movement_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(movement_type.clone()));
    }

    if let Some(user_id) = params.user_id {
        conditions.push(format!("m.user_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(user_id));
    }

    if let Some(from) = params.from {
        conditions.push(format!("m.created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = params.to {
        conditions.push(format!("m.created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_movement_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_movement_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
