//! # Invoice Reader
//!
//! Loads an invoice with all of its line items in a single query.
//!
//! ## Join Decoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SELECT i.*, li.id AS li_id, ... FROM invoices i                        │
//! │  JOIN line_items li ON li.invoice_number = i.invoice_number             │
//! │  WHERE i.invoice_number = ?  ORDER BY li.id                             │
//! │                                                                         │
//! │  row 0: [ header columns │ li_* of item 1 ] ──► Invoice (decoded once)  │
//! │                                          └──► LineItem 1                │
//! │  row 1: [ header columns │ li_* of item 2 ] ──► LineItem 2              │
//! │  ...                                                                    │
//! │  0 rows ──► DbError::NotFound                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stored invoice has at least one line item, so the inner join
//! returning nothing means the invoice does not exist.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};
use std::time::Duration;
use tracing::debug;

use tally_core::{Invoice, InvoiceAggregate, LineItem};

use crate::error::{DbError, DbResult};

const SELECT_INVOICE_WITH_ITEMS: &str = r#"
    SELECT
        i.invoice_number,
        i.customer_name, i.customer_email, i.customer_phone, i.customer_address,
        i.sender_name, i.sender_email, i.sender_phone, i.sender_address,
        i.issue_date, i.due_date, i.status,
        i.subtotal_cents, i.discount_rate_bps, i.discount_cents, i.total_cents,
        i.billing_currency, i.payment_info, i.note, i.created_at,
        li.id                AS li_id,
        li.invoice_number    AS li_invoice_number,
        li.description       AS li_description,
        li.quantity          AS li_quantity,
        li.unit_price_cents  AS li_unit_price_cents,
        li.total_price_cents AS li_total_price_cents
    FROM invoices i
    JOIN line_items li ON li.invoice_number = i.invoice_number
    WHERE i.invoice_number = ?1
    ORDER BY li.id
"#;

/// The line item half of a joined row.
#[derive(Debug, FromRow)]
struct JoinedLineItem {
    #[sqlx(rename = "li_id")]
    id: i64,
    #[sqlx(rename = "li_invoice_number")]
    invoice_number: i64,
    #[sqlx(rename = "li_description")]
    description: String,
    #[sqlx(rename = "li_quantity")]
    quantity: i64,
    #[sqlx(rename = "li_unit_price_cents")]
    unit_price_cents: i64,
    #[sqlx(rename = "li_total_price_cents")]
    total_price_cents: i64,
}

impl From<JoinedLineItem> for LineItem {
    fn from(row: JoinedLineItem) -> Self {
        LineItem {
            id: row.id,
            invoice_number: row.invoice_number,
            description: row.description,
            quantity: row.quantity,
            unit_price_cents: row.unit_price_cents,
            total_price_cents: row.total_price_cents,
        }
    }
}

/// Reads invoices.
#[derive(Debug, Clone)]
pub struct InvoiceReader {
    pool: SqlitePool,
    operation_timeout: Duration,
}

impl InvoiceReader {
    /// Creates a new InvoiceReader.
    pub fn new(pool: SqlitePool, operation_timeout: Duration) -> Self {
        InvoiceReader {
            pool,
            operation_timeout,
        }
    }

    /// Gets an invoice and its line items, ordered by line item id.
    ///
    /// ## Returns
    /// * `Ok(InvoiceAggregate)` - header plus at least one line item
    /// * `Err(DbError::NotFound)` - no such invoice
    pub async fn get_invoice(&self, invoice_number: i64) -> DbResult<InvoiceAggregate> {
        let rows: Vec<SqliteRow> = tokio::time::timeout(
            self.operation_timeout,
            sqlx::query(SELECT_INVOICE_WITH_ITEMS)
                .bind(invoice_number)
                .fetch_all(&self.pool),
        )
        .await
        .map_err(|_| DbError::Timeout(self.operation_timeout))??;

        let aggregate = decode_aggregate(&rows)?
            .ok_or_else(|| DbError::not_found("Invoice", invoice_number))?;

        debug!(
            invoice_number,
            line_items = aggregate.line_items.len(),
            "Invoice loaded"
        );

        Ok(aggregate)
    }
}

/// Builds the aggregate from joined rows; `None` if there are none.
fn decode_aggregate(rows: &[SqliteRow]) -> DbResult<Option<InvoiceAggregate>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let invoice = Invoice::from_row(first)?;
    let line_items = rows
        .iter()
        .map(|row| JoinedLineItem::from_row(row).map(LineItem::from))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(InvoiceAggregate {
        invoice,
        line_items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_missing_invoice_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.invoice_reader().get_invoice(1).await.unwrap_err();
        match err {
            DbError::NotFound { entity, id } => {
                assert_eq!(entity, "Invoice");
                assert_eq!(id, "1");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_no_rows_decode_to_none() {
        assert!(decode_aggregate(&[]).unwrap().is_none());
    }
}
