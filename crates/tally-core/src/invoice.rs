//! # Invoice Assembly
//!
//! Runs the whole pure pipeline for a create request:
//!
//! ```text
//! CreateInvoiceRequest
//!     │  validation::validate_create_request  → status
//!     │  pricing::price_line_items            → items, subtotal
//!     │  DiscountRate::parse_percent          → bps
//!     │  discount::allocate_discount          → discount, total
//!     ▼
//! NewInvoice   (subtotal == discount + total)
//! ```

use crate::discount::allocate_discount;
use crate::error::CoreResult;
use crate::pricing::price_line_items;
use crate::rate::DiscountRate;
use crate::types::{CreateInvoiceRequest, NewInvoice};
use crate::validation::validate_create_request;

impl NewInvoice {
    /// Validates and prices a request into a writable invoice.
    ///
    /// Whitespace around text fields is trimmed. A blank note counts as
    /// absent so the store applies its default.
    pub fn from_request(request: &CreateInvoiceRequest) -> CoreResult<NewInvoice> {
        let status = validate_create_request(request)?;
        let priced = price_line_items(&request.line_items)?;
        let rate = DiscountRate::parse_percent(&request.discount_rate)?;
        let split = allocate_discount(priced.subtotal, rate);

        let note = request
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(NewInvoice {
            customer_name: request.customer_name.trim().to_string(),
            customer_email: request.customer_email.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            customer_address: request.customer_address.trim().to_string(),
            sender_name: request.sender_name.trim().to_string(),
            sender_email: request.sender_email.trim().to_string(),
            sender_phone: request.sender_phone.trim().to_string(),
            sender_address: request.sender_address.trim().to_string(),
            issue_date: request.issue_date,
            due_date: request.due_date,
            status,
            subtotal_cents: priced.subtotal.cents(),
            discount_rate_bps: rate.bps() as i64,
            discount_cents: split.discount.cents(),
            total_cents: split.total.cents(),
            payment_info: request.payment_info.trim().to_string(),
            note,
            line_items: priced.items,
        })
    }
}
