//! Read-only snapshot models feeding the dashboard/report consumers.

use serde::Serialize;
use sqlx::FromRow;

/// Count of equipment (or records) grouped by status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Aggregate counts for the dashboard landing view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub article_count: i64,
    /// Active articles at or below their minimum stock level.
    pub low_stock_count: i64,
    pub equipment_count: i64,
    pub equipment_by_status: Vec<StatusCount>,
    /// Maintenance records still pending or in progress.
    pub open_maintenance_count: i64,
    pub movements_last_7_days: i64,
}
