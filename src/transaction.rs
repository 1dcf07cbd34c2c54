//! Transaction demarcation for multi-step writes.
//!
//! A sequence of dependent write steps runs between one `BEGIN` and one
//! `COMMIT`; concurrent readers observe either none of the steps or all of
//! them. Isolation and durability are the storage engine's job. This module
//! only draws the boundary and guarantees rollback when a step fails or the
//! caller's deadline expires.

use crate::error::{Result, TourneyError};
use futures::future::BoxFuture;
use sqlx::{PgConnection, PgPool};
use std::time::Duration;
use tracing::warn;

/// Run `op` inside a single transaction.
///
/// On success the transaction commits and the closure's value is returned.
/// On failure the transaction rolls back and the original error surfaces
/// unchanged. With a deadline, an overrunning `op` is abandoned, the
/// transaction rolls back, and [`TourneyError::TransactionTimeout`] is
/// returned; `None` preserves unbounded execution.
pub async fn run_in_transaction<T, F>(
    pool: &PgPool,
    deadline: Option<Duration>,
    op: F,
) -> Result<T>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T>>,
{
    let mut tx = pool.begin().await?;

    let outcome = match deadline {
        Some(limit) => match tokio::time::timeout(limit, op(&mut *tx)).await {
            Ok(outcome) => outcome,
            Err(_elapsed) => {
                rollback(tx).await;
                return Err(TourneyError::TransactionTimeout(limit.as_millis() as u64));
            }
        },
        None => op(&mut *tx).await,
    };

    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(step_failure) => {
            rollback(tx).await;
            Err(step_failure)
        }
    }
}

async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>) {
    if let Err(err) = tx.rollback().await {
        warn!("transaction rollback failed: {err}");
    }
}
