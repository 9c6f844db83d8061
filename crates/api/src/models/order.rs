//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use greenbasket_core::{OrderId, OrderNumber, OrderStatus, ProductId};

/// Customer contact fields captured at checkout.
///
/// All fields are required; validation is limited to non-emptiness plus a
/// minimal email shape check in the checkout service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
}

/// A finalized, immutable order.
///
/// Created atomically at checkout and never mutated afterwards; the total
/// never changes even if catalog prices later do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: OrderNumber,
    pub contact: ContactDetails,
    /// Sum of line extensions (quantity x unit price at checkout time).
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

/// One order line with the price captured at checkout time.
///
/// The product name is resolved at read time by joining the catalog, not
/// stored redundantly on the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}
