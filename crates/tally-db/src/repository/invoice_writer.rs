//! # Invoice Writer
//!
//! Persists an invoice header and all of its line items as one unit of work.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_invoice(&NewInvoice)                                            │
//! │       │                                                                 │
//! │       ├── no line items? ──► DbError::EmptyInvoice (no I/O)             │
//! │       │                                                                 │
//! │       ▼  tokio::time::timeout(operation_timeout)                        │
//! │  ┌───────────────────────────────────────────────────────────────┐     │
//! │  │ UnitOfWork::begin                                             │     │
//! │  │   insert_invoice            → invoice_number, created_at      │     │
//! │  │   insert_line_item × N      (submission order → id order)    │     │
//! │  │ commit                                                        │     │
//! │  │   any failure → fail(err): rollback, or RollbackFailed        │     │
//! │  └───────────────────────────────────────────────────────────────┘     │
//! │       │                                                                 │
//! │       ├── deadline passed ──► future dropped, sqlx rolls back,          │
//! │       │                       DbError::Timeout                          │
//! │       ▼                                                                 │
//! │  InvoiceAggregate (header + stored line items)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No partial invoice is ever observable by a reader.

use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, info, warn};

use tally_core::{InvoiceAggregate, NewInvoice};

use crate::error::{DbError, DbResult};
use crate::repository::queries;
use crate::unit_of_work::UnitOfWork;

/// Writes invoices.
#[derive(Debug, Clone)]
pub struct InvoiceWriter {
    pool: SqlitePool,
    operation_timeout: Duration,
}

impl InvoiceWriter {
    /// Creates a new InvoiceWriter.
    pub fn new(pool: SqlitePool, operation_timeout: Duration) -> Self {
        InvoiceWriter {
            pool,
            operation_timeout,
        }
    }

    /// Atomically persists `invoice` and its line items.
    ///
    /// ## Returns
    /// * `Ok(InvoiceAggregate)` - the stored header and line items, with
    ///   every server-assigned field filled in
    /// * `Err(DbError)` - nothing was persisted; see [`DbError::kind`]
    pub async fn create_invoice(&self, invoice: &NewInvoice) -> DbResult<InvoiceAggregate> {
        if invoice.line_items.is_empty() {
            return Err(DbError::EmptyInvoice);
        }

        debug!(
            line_items = invoice.line_items.len(),
            subtotal_cents = invoice.subtotal_cents,
            "Creating invoice"
        );

        let aggregate = tokio::time::timeout(self.operation_timeout, self.create_in_unit_of_work(invoice))
            .await
            .map_err(|_| {
                warn!(
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Invoice creation timed out, transaction abandoned"
                );
                DbError::Timeout(self.operation_timeout)
            })??;

        info!(
            invoice_number = aggregate.invoice.invoice_number,
            line_items = aggregate.line_items.len(),
            total_cents = aggregate.invoice.total_cents,
            "Invoice created"
        );

        Ok(aggregate)
    }

    async fn create_in_unit_of_work(&self, invoice: &NewInvoice) -> DbResult<InvoiceAggregate> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;

        match write_invoice(&mut uow, invoice).await {
            Ok(aggregate) => {
                uow.commit().await?;
                Ok(aggregate)
            }
            Err(err) => Err(uow.fail(err).await),
        }
    }
}

/// Writes the header then each line item, in order, inside `uow`.
async fn write_invoice(uow: &mut UnitOfWork, invoice: &NewInvoice) -> DbResult<InvoiceAggregate> {
    let header = queries::insert_invoice(uow, invoice).await?;

    let mut line_items = Vec::with_capacity(invoice.line_items.len());
    for item in &invoice.line_items {
        line_items.push(queries::insert_line_item(uow, header.invoice_number, item).await?);
    }

    Ok(InvoiceAggregate {
        invoice: header,
        line_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use tally_core::{InvoiceStatus, NewLineItem};

    fn new_invoice() -> NewInvoice {
        NewInvoice {
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "555-0100".to_string(),
            customer_address: "1 Loop St".to_string(),
            sender_name: "Engines Ltd".to_string(),
            sender_email: "billing@engines.example".to_string(),
            sender_phone: "555-0199".to_string(),
            sender_address: "2 Loop St".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2026, 5, 15).unwrap(),
            status: InvoiceStatus::Overdue,
            subtotal_cents: 999,
            discount_rate_bps: 50,
            discount_cents: 4,
            total_cents: 995,
            payment_info: "Cash".to_string(),
            note: Some("Paid in coins".to_string()),
            line_items: vec![NewLineItem {
                description: "Gear".to_string(),
                quantity: 9,
                unit_price_cents: 111,
                total_price_cents: 999,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_returns_stored_aggregate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let aggregate = db.invoice_writer().create_invoice(&new_invoice()).await.unwrap();

        assert_eq!(aggregate.invoice.note, "Paid in coins");
        assert_eq!(aggregate.invoice.status, InvoiceStatus::Overdue);
        assert_eq!(aggregate.line_items.len(), 1);
        assert_eq!(
            aggregate.line_items[0].invoice_number,
            aggregate.invoice.invoice_number
        );
    }

    #[tokio::test]
    async fn test_elapsed_deadline_is_timeout() {
        let config = DbConfig::in_memory().operation_timeout(Duration::ZERO);
        let db = Database::new(config).await.unwrap();

        let err = db
            .invoice_writer()
            .create_invoice(&new_invoice())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Timeout(_)), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::StorageUnavailable);
    }
}
