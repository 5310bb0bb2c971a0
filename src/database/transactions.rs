// ABOUTME: Transaction management with an RAII rollback guard and retry on lock contention
// ABOUTME: Wraps SQLite transactions so multi-statement writes are all-or-nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! Transaction helpers
//!
//! - [`TransactionGuard`] rolls back automatically unless `commit()` is called.
//! - [`retry_transaction`] reruns a whole transactional operation with
//!   exponential backoff when `SQLite` reports lock contention.
//!
//! ```text
//! retry_transaction(|| async {
//!     let mut guard = TransactionGuard::begin(pool).await?;
//!     sqlx::query("DELETE FROM ingredients ...").execute(guard.executor()?).await?;
//!     sqlx::query("UPDATE recipes ...").execute(guard.executor()?).await?;
//!     guard.commit().await
//! }, 3).await
//! ```

use std::future::Future;
use std::time::Duration;

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::{DatabaseError, DatabaseResult};

/// Retry a transactional operation while it fails with a transient error
///
/// Only [`DatabaseError::Contention`] (`SQLITE_BUSY`, `SQLITE_LOCKED`, pool
/// timeouts) is retried, with 10ms, 20ms, 40ms... backoff. Everything else,
/// including version conflicts and constraint violations, is returned
/// immediately.
///
/// # Errors
///
/// Returns the last error once `max_retries` attempts have failed, or the
/// first non-retryable error.
pub async fn retry_transaction<F, Fut, T>(mut f: F, max_retries: u32) -> DatabaseResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = DatabaseResult<T>>,
{
    let mut attempts = 0_u32;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                if !matches!(e, DatabaseError::Contention { .. }) {
                    debug!(attempts, error = %e, "Transaction failed with non-retryable error");
                    return Err(e);
                }
                if attempts >= max_retries {
                    error!(
                        attempts,
                        max_retries,
                        error = %e,
                        "Transaction failed after max retries"
                    );
                    return Err(e);
                }
                let backoff_ms = backoff_delay_ms(attempts);
                warn!(
                    attempt = attempts,
                    max_retries,
                    backoff_ms,
                    error = %e,
                    "Transaction hit lock contention, retrying after backoff"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): 10ms, 20ms, 40ms...
const fn backoff_delay_ms(attempt: u32) -> u64 {
    let exponent = if attempt > 10 { 9 } else { attempt.saturating_sub(1) };
    10_u64 << exponent
}

/// RAII guard for a `SQLite` transaction
///
/// Dropping the guard without calling [`commit`](Self::commit) rolls the
/// transaction back.
pub struct TransactionGuard<'c> {
    transaction: Option<Transaction<'c, Sqlite>>,
    committed: bool,
}

impl<'c> TransactionGuard<'c> {
    /// Wrap an already started transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, Sqlite>) -> Self {
        Self {
            transaction: Some(transaction),
            committed: false,
        }
    }

    /// Start a transaction on `pool`
    ///
    /// # Errors
    ///
    /// Returns an error if no connection could be acquired
    pub async fn begin(pool: &'c SqlitePool) -> DatabaseResult<Self> {
        let transaction = pool
            .begin()
            .await
            .map_err(|e| DatabaseError::from_sqlx("Failed to begin transaction", &e))?;
        Ok(Self::new(transaction))
    }

    /// Commit and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails
    pub async fn commit(mut self) -> DatabaseResult<()> {
        let transaction = self.transaction.take().ok_or_else(|| DatabaseError::QueryError {
            context: "Transaction already consumed - cannot commit".to_owned(),
        })?;
        transaction
            .commit()
            .await
            .map_err(|e| DatabaseError::from_sqlx("Transaction commit failed", &e))?;
        self.committed = true;
        debug!("Transaction committed");
        Ok(())
    }

    /// Check if the transaction has been committed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        self.committed
    }

    /// Connection to run statements on
    ///
    /// # Errors
    ///
    /// Returns an error if the guard was already committed
    pub fn executor(&mut self) -> DatabaseResult<&mut SqliteConnection> {
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| DatabaseError::QueryError {
                context: "Transaction already consumed - guard used after commit".to_owned(),
            })
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if self.transaction.is_some() && !self.committed {
            debug!("Transaction dropped without commit, rolling back");
        }
    }
}
