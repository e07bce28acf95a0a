//! Aggregate statistics for the dashboard endpoint.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardSummary, StatusCount};

/// Provides read-only aggregate queries across the stock and equipment
/// tables.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Collect the dashboard summary. Several independent reads at default
    /// isolation; the numbers are informational, not a consistent snapshot.
    pub async fn summary(pool: &PgPool) -> Result<DashboardSummary, sqlx::Error> {
        let (article_count, low_stock_count): (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*) AS article_count,
                COUNT(*) FILTER (WHERE stock_current <= stock_min) AS low_stock_count
             FROM articles WHERE is_active = true",
        )
        .fetch_one(pool)
        .await?;

        let equipment_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE is_active = true")
                .fetch_one(pool)
                .await?;

        let equipment_by_status: Vec<StatusCount> = sqlx::query_as(
            "SELECT status, COUNT(*) AS count
             FROM equipment WHERE is_active = true
             GROUP BY status
             ORDER BY status ASC",
        )
        .fetch_all(pool)
        .await?;

        let open_maintenance_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_records
             WHERE status IN ('pending', 'in_progress')",
        )
        .fetch_one(pool)
        .await?;

        let movements_last_7_days: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM movements WHERE created_at >= NOW() - INTERVAL '7 days'",
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardSummary {
            article_count,
            low_stock_count,
            equipment_count,
            equipment_by_status,
            open_maintenance_count,
            movements_last_7_days,
        })
    }
}
