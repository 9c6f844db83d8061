//! Catalog repository for product database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use greenbasket_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    description: String,
    price: Decimal,
    image_url: String,
    category: String,
    brand: String,
    stock: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            category: row.category,
            brand: row.brand,
            stock: row.stock,
            created_at: row.created_at,
        }
    }
}

/// Repository for catalog product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by exact category match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image_url, category, brand, stock, created_at
            FROM shop.product
            WHERE $1::text IS NULL OR category = $1
            ORDER BY id
            ",
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image_url, category, brand, stock, created_at
            FROM shop.product
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// List the distinct category labels in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT category
            FROM shop.product
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Count products in the catalog.
    ///
    /// Used by the seeding command to keep seeding idempotent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shop.product")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a new product (catalog seeding only; the storefront itself
    /// never creates products).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO shop.product (name, description, price, image_url, category, brand, stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, image_url, category, brand, stock, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(&input.category)
        .bind(&input.brand)
        .bind(input.stock)
        .fetch_one(self.pool)
        .await?;

        Ok(Product::from(row))
    }
}
