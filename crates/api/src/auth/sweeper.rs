//! Periodic cleanup of expired and revoked sessions.

use std::time::Duration;

use depot_db::repositories::SessionRepo;
use depot_db::DbPool;

/// How often the sweeper purges dead session rows.
const SWEEP_INTERVAL_SECS: u64 = 3600;

/// Spawn a background task that periodically deletes expired and revoked
/// sessions from the database.
///
/// Revoked rows are kept out of the auth path by the lookup queries already;
/// the sweeper only stops the table from growing without bound. The returned
/// `JoinHandle` can be used to abort the task during shutdown.
pub fn start_session_sweeper(pool: DbPool) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;
            match SessionRepo::cleanup_expired(&pool).await {
                Ok(deleted) if deleted > 0 => {
                    tracing::info!(deleted, "Session sweep removed dead sessions");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Session sweep failed");
                }
            }
        }
    })
}
