//! Cart manager service.
//!
//! Reconciles cart additions, quantity changes, and removals against the
//! catalog's current stock. Stock is read-only here; only the cart store is
//! mutated. Stock checks at this layer are advisory - checkout re-validates
//! everything under row locks before money changes hands.

use sqlx::PgPool;
use thiserror::Error;

use greenbasket_core::{CartLineId, ProductId, SessionToken};

use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::models::{CartLineWithProduct, Product};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity was zero or negative.
    #[error("quantity must be positive")]
    InvalidQuantity,

    /// Product does not exist in the catalog.
    #[error("product not found")]
    ProductNotFound,

    /// Cart line does not exist.
    #[error("cart line not found")]
    LineNotFound,

    /// Requested quantity exceeds the product's available stock.
    #[error("insufficient stock for {product}")]
    InsufficientStock { product: String },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a quantity update: the line was either updated or removed
/// (quantity dropped to zero or below).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    Updated,
    Removed,
}

/// Cart manager service.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
    cart: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            cart: CartRepository::new(pool),
        }
    }

    /// List a session's cart lines with joined product data.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn list(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<CartLineWithProduct>, CartError> {
        Ok(self.cart.list_for_session(session).await?)
    }

    /// Add a product to a session's cart, merging with any existing line.
    ///
    /// The resulting quantity (existing + requested) must not exceed the
    /// product's current stock; on violation the cart is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for non-positive quantities,
    /// `CartError::ProductNotFound` for unknown products, and
    /// `CartError::InsufficientStock` when the merged quantity exceeds stock.
    pub async fn add(
        &self,
        session: &SessionToken,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLineWithProduct, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let existing = self.cart.find_line(session, product_id).await?;
        let merged = merged_quantity(existing.as_ref().map(|line| line.quantity), quantity);
        check_stock(&product, merged)?;

        let line = self.cart.upsert_add(session, product_id, quantity).await?;

        self.cart
            .get_with_product(line.id)
            .await?
            .ok_or(CartError::LineNotFound)
    }

    /// Overwrite a line's quantity; a quantity of zero or below removes the
    /// line instead.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` for unknown lines and
    /// `CartError::InsufficientStock` when the quantity exceeds current
    /// stock (the line's quantity is left unchanged).
    pub async fn set_quantity(
        &self,
        id: CartLineId,
        quantity: i32,
    ) -> Result<QuantityOutcome, CartError> {
        let existing = self
            .cart
            .get_with_product(id)
            .await?
            .ok_or(CartError::LineNotFound)?;

        if quantity <= 0 {
            self.cart.delete(id).await?;
            return Ok(QuantityOutcome::Removed);
        }

        check_stock(&existing.product, quantity)?;

        if !self.cart.update_quantity(id, quantity).await? {
            return Err(CartError::LineNotFound);
        }
        Ok(QuantityOutcome::Updated)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineNotFound` if the line does not exist.
    pub async fn remove(&self, id: CartLineId) -> Result<(), CartError> {
        if !self.cart.delete(id).await? {
            return Err(CartError::LineNotFound);
        }
        Ok(())
    }

    /// Remove all of a session's cart lines. Clearing an empty cart is fine.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the query fails.
    pub async fn clear(&self, session: &SessionToken) -> Result<(), CartError> {
        let deleted = self.cart.clear_session(session).await?;
        tracing::debug!(session = %session, deleted, "cart cleared");
        Ok(())
    }
}

/// Quantity a line would hold after merging an addition into it.
fn merged_quantity(existing: Option<i32>, requested: i32) -> i32 {
    existing.unwrap_or(0).saturating_add(requested)
}

/// Verify a requested quantity against a product's current stock.
fn check_stock(product: &Product, quantity: i32) -> Result<(), CartError> {
    if quantity > product.stock {
        return Err(CartError::InsufficientStock {
            product: product.name.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Omega-3 Fish Oil Capsules".to_string(),
            description: String::new(),
            price: Decimal::new(2499, 2),
            image_url: String::new(),
            category: "Supplements".to_string(),
            brand: "HealthPlus".to_string(),
            stock,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_merged_quantity_accumulates() {
        assert_eq!(merged_quantity(None, 2), 2);
        assert_eq!(merged_quantity(Some(3), 2), 5);
    }

    #[test]
    fn test_merged_quantity_saturates() {
        assert_eq!(merged_quantity(Some(i32::MAX), 1), i32::MAX);
    }

    #[test]
    fn test_check_stock_allows_exact_stock() {
        assert!(check_stock(&product(5), 5).is_ok());
    }

    #[test]
    fn test_check_stock_rejects_over_stock() {
        let err = check_stock(&product(5), 6).expect_err("over stock");
        match err {
            CartError::InsufficientStock { product } => {
                assert_eq!(product, "Omega-3 Fish Oil Capsules");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
