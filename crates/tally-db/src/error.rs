//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼  DbError::kind()                                               │
//! │  ErrorKind { NotFound | ConstraintViolation | StorageUnavailable }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Calling layer maps the kind to its own response                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Coarse failure categories a calling layer can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested invoice does not exist.
    NotFound,
    /// A relational or value rule rejected the write.
    ConstraintViolation,
    /// The store could not be reached or did not complete the operation.
    StorageUnavailable,
}

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Reading an invoice number that was never created
    /// - Reading an invoice whose creation was rolled back
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Unique constraint violated: {message}")]
    UniqueViolation { message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a line item for an invoice number that does not exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - `subtotal_cents != discount_cents + total_cents`
    /// - Rate outside 0..=10000 bps
    /// - Empty description, non-positive quantity, inconsistent line total
    #[error("Check constraint violated: {message}")]
    CheckViolation { message: String },

    /// NOT NULL constraint violation.
    #[error("Not null constraint violated: {message}")]
    NotNullViolation { message: String },

    /// An invoice was submitted without line items.
    #[error("Invoice must have at least one line item")]
    EmptyInvoice,

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin / commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// A unit of work failed and rolling it back failed too.
    ///
    /// `cause` is the original failure; its kind is the kind of this error.
    #[error("{cause} (rollback also failed: {rollback})")]
    RollbackFailed { cause: Box<DbError>, rollback: String },

    /// The operation did not finish within the configured deadline.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// The failure category of this error.
    ///
    /// ```text
    /// NotFound                                   → NotFound
    /// Unique / ForeignKey / Check / NotNull,
    /// EmptyInvoice                               → ConstraintViolation
    /// RollbackFailed { cause, .. }               → cause.kind()
    /// everything else                            → StorageUnavailable
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::NotFound { .. } => ErrorKind::NotFound,
            DbError::UniqueViolation { .. }
            | DbError::ForeignKeyViolation { .. }
            | DbError::CheckViolation { .. }
            | DbError::NotNullViolation { .. }
            | DbError::EmptyInvoice => ErrorKind::ConstraintViolation,
            DbError::RollbackFailed { cause, .. } => cause.kind(),
            DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::TransactionFailed(_)
            | DbError::Timeout(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => ErrorKind::StorageUnavailable,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → classified by the driver's constraint kind
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::Io / PoolClosed→ DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => DbError::UniqueViolation { message },
                    sqlx::error::ErrorKind::ForeignKeyViolation => {
                        DbError::ForeignKeyViolation { message }
                    }
                    sqlx::error::ErrorKind::CheckViolation => DbError::CheckViolation { message },
                    sqlx::error::ErrorKind::NotNullViolation => {
                        DbError::NotNullViolation { message }
                    }
                    _ => DbError::QueryFailed(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            sqlx::Error::Io(io_err) => DbError::ConnectionFailed(io_err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
