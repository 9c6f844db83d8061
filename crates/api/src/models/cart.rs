//! Cart line models.

use chrono::{DateTime, Utc};

use greenbasket_core::{CartLineId, ProductId, SessionToken};

use super::Product;

/// One (session, product) pairing with a quantity.
///
/// At most one line exists per (session, product); adding the same product
/// again merges by accumulating quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub id: CartLineId,
    pub product_id: ProductId,
    pub session: SessionToken,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A cart line joined with its product snapshot for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineWithProduct {
    pub line: CartLine,
    pub product: Product,
}
