//! Catalog product models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use greenbasket_core::ProductId;

/// A purchasable catalog product.
///
/// Read-only from the storefront's perspective except for `stock`, which
/// checkout decrements. Creation and restocking happen outside this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: String,
    /// Remaining purchasable units; never negative.
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a product (used by catalog seeding).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub brand: String,
    pub stock: i32,
}
