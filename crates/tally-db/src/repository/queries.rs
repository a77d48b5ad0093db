//! # Invoice Queries
//!
//! The individual statements a unit of work is built from. Every function
//! takes the [`UnitOfWork`] it runs in, so nothing here can write outside
//! a transaction.

use tracing::debug;

use tally_core::{Invoice, LineItem, NewInvoice, NewLineItem, DEFAULT_NOTE};

use crate::error::DbResult;
use crate::unit_of_work::UnitOfWork;

/// Inserts an invoice header and returns it with its server-assigned
/// fields (`invoice_number`, `billing_currency`, `note`, `created_at`).
///
/// Line items are not touched; see [`insert_line_item`].
pub async fn insert_invoice(uow: &mut UnitOfWork, invoice: &NewInvoice) -> DbResult<Invoice> {
    let stored: Invoice = sqlx::query_as(
        r#"
        INSERT INTO invoices (
            customer_name, customer_email, customer_phone, customer_address,
            sender_name, sender_email, sender_phone, sender_address,
            issue_date, due_date, status,
            subtotal_cents, discount_rate_bps, discount_cents, total_cents,
            payment_info, note
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
        RETURNING
            invoice_number,
            customer_name, customer_email, customer_phone, customer_address,
            sender_name, sender_email, sender_phone, sender_address,
            issue_date, due_date, status,
            subtotal_cents, discount_rate_bps, discount_cents, total_cents,
            billing_currency, payment_info, note, created_at
        "#,
    )
    .bind(&invoice.customer_name)
    .bind(&invoice.customer_email)
    .bind(&invoice.customer_phone)
    .bind(&invoice.customer_address)
    .bind(&invoice.sender_name)
    .bind(&invoice.sender_email)
    .bind(&invoice.sender_phone)
    .bind(&invoice.sender_address)
    .bind(invoice.issue_date)
    .bind(invoice.due_date)
    .bind(invoice.status)
    .bind(invoice.subtotal_cents)
    .bind(invoice.discount_rate_bps)
    .bind(invoice.discount_cents)
    .bind(invoice.total_cents)
    .bind(&invoice.payment_info)
    .bind(invoice.note.as_deref().unwrap_or(DEFAULT_NOTE))
    .fetch_one(uow.conn())
    .await?;

    debug!(invoice_number = stored.invoice_number, "Invoice header inserted");
    Ok(stored)
}

/// Inserts one line item under `invoice_number`.
///
/// Fails with `ForeignKeyViolation` if the invoice does not exist (in this
/// unit of work or already committed).
pub async fn insert_line_item(
    uow: &mut UnitOfWork,
    invoice_number: i64,
    item: &NewLineItem,
) -> DbResult<LineItem> {
    let stored: LineItem = sqlx::query_as(
        r#"
        INSERT INTO line_items (
            invoice_number, description, quantity, unit_price_cents, total_price_cents
        )
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, invoice_number, description, quantity, unit_price_cents, total_price_cents
        "#,
    )
    .bind(invoice_number)
    .bind(&item.description)
    .bind(item.quantity)
    .bind(item.unit_price_cents)
    .bind(item.total_price_cents)
    .fetch_one(uow.conn())
    .await?;

    debug!(
        invoice_number,
        line_item_id = stored.id,
        "Line item inserted"
    );
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DbError, ErrorKind};
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use tally_core::InvoiceStatus;

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
            status: InvoiceStatus::Draft,
            subtotal_cents: 10000,
            discount_rate_bps: 1000,
            discount_cents: 1000,
            total_cents: 9000,
            payment_info: "Wire".to_string(),
            note: None,
            line_items: vec![],
        }
    }

    fn item(description: &str) -> NewLineItem {
        NewLineItem {
            description: description.to_string(),
            quantity: 2,
            unit_price_cents: 5000,
            total_price_cents: 10000,
        }
    }

    #[tokio::test]
    async fn test_insert_invoice_assigns_server_fields() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let invoice = insert_invoice(&mut uow, &new_invoice()).await.unwrap();
        let line = insert_line_item(&mut uow, invoice.invoice_number, &item("Engine"))
            .await
            .unwrap();
        uow.commit().await.unwrap();

        assert!(invoice.invoice_number > 0);
        assert_eq!(invoice.billing_currency, "USD");
        assert_eq!(invoice.note, DEFAULT_NOTE);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(line.invoice_number, invoice.invoice_number);
        assert!(line.id > 0);
    }

    #[tokio::test]
    async fn test_line_item_for_missing_invoice_is_fk_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let err = insert_line_item(&mut uow, 999, &item("Orphan"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{:?}", err);
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        uow.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_unbalanced_amounts_are_check_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let mut invoice = new_invoice();
        invoice.total_cents += 1;
        let err = insert_invoice(&mut uow, &invoice).await.unwrap_err();

        assert!(matches!(err, DbError::CheckViolation { .. }), "{:?}", err);
        uow.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_inconsistent_line_total_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let invoice = insert_invoice(&mut uow, &new_invoice()).await.unwrap();

        let mut bad = item("Engine");
        bad.total_price_cents = 9999;
        let err = insert_line_item(&mut uow, invoice.invoice_number, &bad)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        uow.rollback().await.unwrap();
    }
}
