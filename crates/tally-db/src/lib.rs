//! # tally-db: Invoice Storage for Tally
//!
//! This crate persists invoices in SQLite with sqlx. Creation is one
//! explicit unit of work; reads are one JOIN query.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Data Flow                                │
//! │                                                                         │
//! │  Calling layer (tally binary)                                          │
//! │       │  NewInvoice::from_request  (tally-core)                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tally-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ InvoiceWriter  │    │ 001_create_  │  │   │
//! │  │   │ SqlitePool    │◄───│ InvoiceReader  │    │ invoices.sql │  │   │
//! │  │   │ UnitOfWork    │    │ queries        │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (WAL, foreign keys on)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - Loading [`DbConfig`] from the environment
//! - [`unit_of_work`] - Explicit transaction scope
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and [`ErrorKind`]
//! - [`repository`] - Invoice writer, reader and queries
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::NewInvoice;
//! use tally_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let new_invoice = NewInvoice::from_request(&request)?;
//! let created = db.invoice_writer().create_invoice(&new_invoice).await?;
//!
//! let invoice = db.invoice_reader().get_invoice(created.invoice.invoice_number).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ConfigError;
pub use error::{DbError, DbResult, ErrorKind};
pub use pool::{Database, DbConfig};
pub use unit_of_work::UnitOfWork;

pub use repository::invoice_reader::InvoiceReader;
pub use repository::invoice_writer::InvoiceWriter;
