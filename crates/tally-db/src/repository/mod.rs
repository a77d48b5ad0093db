//! # Repository Module
//!
//! Invoice persistence for Tally.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Database::invoice_writer()          Database::invoice_reader()         │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  InvoiceWriter                       InvoiceReader                      │
//! │  └── create_invoice                  └── get_invoice                    │
//! │       │  one UnitOfWork                   │  one JOIN query             │
//! │       ▼                                   │                             │
//! │  queries                                  │                             │
//! │  ├── insert_invoice                       │                             │
//! │  └── insert_line_item                     │                             │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  SQLite: invoices ◄──FK── line_items                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`InvoiceWriter`](invoice_writer::InvoiceWriter) - Atomic invoice creation
//! - [`InvoiceReader`](invoice_reader::InvoiceReader) - Single-query invoice reads

pub mod invoice_reader;
pub mod invoice_writer;
pub mod queries;
