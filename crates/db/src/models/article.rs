//! Article entity model and DTOs.
//!
//! `stock_current` is owned by the movement ledger: it is set once at
//! creation (mirrored into `stock_initial`) and from then on only
//! `ArticleRepo::record_movement` may change it. `UpdateArticle` cannot
//! express a stock edit.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use depot_core::types::{DbId, Timestamp};

/// An article row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub serial_number: Option<String>,
    /// Stock at creation time. Never updated; the baseline for ledger audits.
    pub stock_initial: i32,
    pub stock_current: i32,
    pub stock_min: i32,
    pub stock_max: Option<i32>,
    pub location: String,
    pub status: String,
    pub is_active: bool,
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Article row with the category name resolved, for read endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleWithCategory {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub serial_number: Option<String>,
    pub stock_initial: i32,
    pub stock_current: i32,
    pub stock_min: i32,
    pub stock_max: Option<i32>,
    pub location: String,
    pub status: String,
    pub is_active: bool,
    pub category_id: DbId,
    pub category_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article. `stock_current` becomes both the initial
/// baseline and the live counter.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub code: String,
    pub name: String,
    pub description: String,
    pub serial_number: Option<String>,
    pub stock_current: i32,
    pub stock_min: i32,
    pub stock_max: Option<i32>,
    pub location: String,
    /// Defaults to `available` when omitted.
    pub status: Option<String>,
    pub category_id: DbId,
}

/// DTO for updating an article. All fields are optional; stock counters are
/// deliberately absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArticle {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub stock_min: Option<i32>,
    pub stock_max: Option<i32>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
    pub category_id: Option<DbId>,
}

/// Result of auditing an article's ledger against its stock counter.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerCheck {
    pub article_id: DbId,
    pub stock_initial: i32,
    pub stock_current: i32,
    /// Sum of signed movement quantities (entries positive, exits negative).
    pub movement_sum: i64,
    /// `stock_initial + movement_sum`; equals `stock_current` when consistent.
    pub expected_stock: i64,
    pub consistent: bool,
}
