//! Cart repository for cart line database operations.
//!
//! Stock is never written here; the cart store is the only table this
//! repository mutates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use greenbasket_core::{CartLineId, ProductId, SessionToken};

use super::RepositoryError;
use crate::models::{CartLine, CartLineWithProduct, Product};

/// Internal row type for bare cart line queries.
#[derive(Debug, sqlx::FromRow)]
struct CartLineRow {
    id: i32,
    product_id: i32,
    session_id: String,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl CartLineRow {
    fn into_model(self) -> Result<CartLine, RepositoryError> {
        let session = SessionToken::parse(&self.session_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid session token in database: {e}"))
        })?;

        Ok(CartLine {
            id: CartLineId::new(self.id),
            product_id: ProductId::new(self.product_id),
            session,
            quantity: self.quantity,
            created_at: self.created_at,
        })
    }
}

/// Internal row type for cart lines joined with their product.
#[derive(Debug, sqlx::FromRow)]
struct CartLineJoinedRow {
    id: i32,
    product_id: i32,
    session_id: String,
    quantity: i32,
    created_at: DateTime<Utc>,
    product_name: String,
    product_description: String,
    product_price: Decimal,
    product_image_url: String,
    product_category: String,
    product_brand: String,
    product_stock: i32,
    product_created_at: DateTime<Utc>,
}

impl CartLineJoinedRow {
    fn into_model(self) -> Result<CartLineWithProduct, RepositoryError> {
        let session = SessionToken::parse(&self.session_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid session token in database: {e}"))
        })?;

        Ok(CartLineWithProduct {
            line: CartLine {
                id: CartLineId::new(self.id),
                product_id: ProductId::new(self.product_id),
                session,
                quantity: self.quantity,
                created_at: self.created_at,
            },
            product: Product {
                id: ProductId::new(self.product_id),
                name: self.product_name,
                description: self.product_description,
                price: self.product_price,
                image_url: self.product_image_url,
                category: self.product_category,
                brand: self.product_brand,
                stock: self.product_stock,
                created_at: self.product_created_at,
            },
        })
    }
}

/// Columns selected for joined cart line queries.
const JOINED_COLUMNS: &str = r"
    cl.id, cl.product_id, cl.session_id, cl.quantity, cl.created_at,
    p.name AS product_name,
    p.description AS product_description,
    p.price AS product_price,
    p.image_url AS product_image_url,
    p.category AS product_category,
    p.brand AS product_brand,
    p.stock AS product_stock,
    p.created_at AS product_created_at
";

/// Repository for cart line database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a session's cart lines with joined product data, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored session token is invalid.
    pub async fn list_for_session(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<CartLineWithProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineJoinedRow>(&format!(
            r"
            SELECT {JOINED_COLUMNS}
            FROM shop.cart_line cl
            JOIN shop.product p ON p.id = cl.product_id
            WHERE cl.session_id = $1
            ORDER BY cl.created_at, cl.id
            "
        ))
        .bind(session.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineJoinedRow::into_model).collect()
    }

    /// Get a single cart line with joined product data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored session token is invalid.
    pub async fn get_with_product(
        &self,
        id: CartLineId,
    ) -> Result<Option<CartLineWithProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineJoinedRow>(&format!(
            r"
            SELECT {JOINED_COLUMNS}
            FROM shop.cart_line cl
            JOIN shop.product p ON p.id = cl.product_id
            WHERE cl.id = $1
            "
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(CartLineJoinedRow::into_model).transpose()
    }

    /// Find the line for a (session, product) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored session token is invalid.
    pub async fn find_line(
        &self,
        session: &SessionToken,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT id, product_id, session_id, quantity, created_at
            FROM shop.cart_line
            WHERE session_id = $1 AND product_id = $2
            ",
        )
        .bind(session.as_str())
        .bind(product_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(CartLineRow::into_model).transpose()
    }

    /// Add `quantity` of a product to a session's cart, merging into the
    /// existing line if one exists.
    ///
    /// The merge is a single upsert against the (session, product) unique
    /// constraint, so concurrent adds accumulate instead of clobbering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored session token is invalid.
    pub async fn upsert_add(
        &self,
        session: &SessionToken,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLine, RepositoryError> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r"
            INSERT INTO shop.cart_line (session_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id, product_id)
            DO UPDATE SET quantity = shop.cart_line.quantity + EXCLUDED.quantity
            RETURNING id, product_id, session_id, quantity, created_at
            ",
        )
        .bind(session.as_str())
        .bind(product_id.as_i32())
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        row.into_model()
    }

    /// Overwrite a line's quantity.
    ///
    /// Returns `true` if the line existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_quantity(
        &self,
        id: CartLineId,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.cart_line
            SET quantity = $1
            WHERE id = $2
            ",
        )
        .bind(quantity)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a cart line.
    ///
    /// Returns `true` if the line existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartLineId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_line WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a session's cart lines.
    ///
    /// Returns the number of lines deleted; deleting an already-empty cart
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear_session(&self, session: &SessionToken) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM shop.cart_line WHERE session_id = $1")
            .bind(session.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
