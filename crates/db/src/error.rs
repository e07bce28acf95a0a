//! Error type for repository operations that mix storage and domain failures.

use depot_core::CoreError;

/// Error returned by the transactional engines (stock ledger, equipment
/// lifecycle), which enforce domain rules inside a database transaction.
///
/// Plain CRUD methods return `sqlx::Error` directly; `DbError` exists so an
/// engine can abort with a typed domain error (insufficient stock, missing
/// aggregate, dangling reference) without losing the storage error channel.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
