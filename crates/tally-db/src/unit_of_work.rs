//! # Unit of Work
//!
//! An explicit transaction scope. Everything written through one
//! [`UnitOfWork`] becomes visible together on [`UnitOfWork::commit`], or not
//! at all.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UnitOfWork::begin(pool)                                                │
//! │       │   acquires one pooled connection, BEGIN                         │
//! │       ▼                                                                 │
//! │  queries::insert_*(&mut uow, ..)   (all on the same connection)         │
//! │       │                                                                 │
//! │       ├── Ok  ──► commit()   ──► COMMIT, connection back to pool        │
//! │       │                                                                 │
//! │       ├── Err ──► fail(err)  ──► ROLLBACK                               │
//! │       │               └── rollback fails → DbError::RollbackFailed      │
//! │       │                                                                 │
//! │       └── dropped (timeout, cancelled future, panic)                    │
//! │                   ──► sqlx rolls the transaction back on drop           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// A transaction-scoped unit of work over one pooled connection.
///
/// Consumed by [`commit`](Self::commit), [`rollback`](Self::rollback) or
/// [`fail`](Self::fail); a dropped unit of work is rolled back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitOfWork").finish_non_exhaustive()
    }
}

impl UnitOfWork {
    /// Acquires a connection and begins a transaction.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool.begin().await.map_err(|e| match DbError::from(e) {
            DbError::Internal(msg) | DbError::QueryFailed(msg) => DbError::TransactionFailed(msg),
            other => other,
        })?;
        debug!("Unit of work started");
        Ok(UnitOfWork { tx })
    }

    /// The connection every statement of this unit of work runs on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    /// Makes every write of this unit of work visible.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(format!("commit: {}", e)))?;
        debug!("Unit of work committed");
        Ok(())
    }

    /// Discards every write of this unit of work.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(format!("rollback: {}", e)))?;
        debug!("Unit of work rolled back");
        Ok(())
    }

    /// Rolls back after `cause` and returns the error to report.
    ///
    /// If the rollback fails as well, both failures are returned together
    /// and the result keeps the kind of `cause`.
    pub async fn fail(self, cause: DbError) -> DbError {
        match self.tx.rollback().await {
            Ok(()) => {
                debug!(error = %cause, "Unit of work rolled back after failure");
                cause
            }
            Err(rollback_err) => {
                warn!(
                    error = %cause,
                    rollback_error = %rollback_err,
                    "Rollback failed after unit of work failure"
                );
                DbError::RollbackFailed {
                    cause: Box::new(cause),
                    rollback: rollback_err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn count_rows(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM _scratch")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn setup() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("CREATE TABLE _scratch (v INTEGER NOT NULL)")
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_commit_makes_writes_visible() {
        let db = setup().await;

        let mut uow = db.begin().await.unwrap();
        sqlx::query("INSERT INTO _scratch (v) VALUES (1)")
            .execute(uow.conn())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        assert_eq!(count_rows(&db).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = setup().await;

        let mut uow = db.begin().await.unwrap();
        sqlx::query("INSERT INTO _scratch (v) VALUES (1)")
            .execute(uow.conn())
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(count_rows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_fail_returns_cause() {
        let db = setup().await;

        let mut uow = db.begin().await.unwrap();
        sqlx::query("INSERT INTO _scratch (v) VALUES (1)")
            .execute(uow.conn())
            .await
            .unwrap();
        let err = uow.fail(DbError::EmptyInvoice).await;

        assert!(matches!(err, DbError::EmptyInvoice));
        assert_eq!(count_rows(&db).await, 0);
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_is_rolled_back() {
        let db = setup().await;

        {
            let mut uow = db.begin().await.unwrap();
            sqlx::query("INSERT INTO _scratch (v) VALUES (1)")
                .execute(uow.conn())
                .await
                .unwrap();
        }

        assert_eq!(count_rows(&db).await, 0);
    }
}
