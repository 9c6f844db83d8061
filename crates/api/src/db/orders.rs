//! Order repository: atomic checkout and order reads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use greenbasket_core::{OrderId, OrderNumber, OrderStatus, ProductId, SessionToken};

use super::RepositoryError;
use crate::models::{ContactDetails, Order, OrderLine};

/// Errors from the checkout transaction.
///
/// Distinct from [`RepositoryError`] because the first two variants are
/// business outcomes the caller must surface to the client, not storage
/// faults.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The session has no cart lines to convert.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line's quantity exceeds the product's current stock.
    #[error("insufficient stock for {product}")]
    OutOfStock { product: String },

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Internal row type for the locked cart read at the start of checkout.
#[derive(Debug, sqlx::FromRow)]
struct CheckoutLineRow {
    product_id: i32,
    quantity: i32,
    product_name: String,
    price: Decimal,
    stock: i32,
}

/// Internal row type for order header queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    customer_name: String,
    email: String,
    phone: String,
    address: String,
    city: String,
    zip_code: String,
    total_amount: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_model(self, lines: Vec<OrderLine>) -> Result<Order, RepositoryError> {
        let order_number = OrderNumber::parse(&self.order_number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order number in database: {e}"))
        })?;
        let status = self.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            order_number,
            contact: ContactDetails {
                customer_name: self.customer_name,
                email: self.email,
                phone: self.phone,
                address: self.address,
                city: self.city,
                zip_code: self.zip_code,
            },
            total_amount: self.total_amount,
            status,
            created_at: self.created_at,
            lines,
        })
    }
}

/// Internal row type for order line reads (product name joined at read time).
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    product_id: i32,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert a session's cart into an order in one transaction.
    ///
    /// Inside a single transaction this:
    /// 1. Loads the session's cart lines joined with their products, taking
    ///    row locks on the products (`FOR UPDATE OF p`) so a concurrent
    ///    checkout cannot read the same stock.
    /// 2. Re-validates every line's quantity against current stock; the first
    ///    violation aborts the whole checkout.
    /// 3. Computes the total from current prices and inserts the order and
    ///    its lines, capturing the unit price on each line.
    /// 4. Decrements each product's stock with a `stock >= quantity` guard.
    /// 5. Deletes the session's cart lines.
    ///
    /// All effects commit together or not at all; on any error the cart,
    /// stock, and order store are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceOrderError::EmptyCart`] when the session has no lines,
    /// [`PlaceOrderError::OutOfStock`] when a line exceeds current stock, and
    /// [`PlaceOrderError::Database`] for storage faults.
    pub async fn place_order(
        &self,
        session: &SessionToken,
        contact: &ContactDetails,
        order_number: &OrderNumber,
    ) -> Result<Order, PlaceOrderError> {
        let mut tx = self.pool.begin().await?;

        // Lock the product rows for the whole checkout so two concurrent
        // checkouts of the last unit cannot both pass the stock check.
        let cart = sqlx::query_as::<_, CheckoutLineRow>(
            r"
            SELECT cl.product_id, cl.quantity,
                   p.name AS product_name, p.price, p.stock
            FROM shop.cart_line cl
            JOIN shop.product p ON p.id = cl.product_id
            WHERE cl.session_id = $1
            ORDER BY cl.created_at, cl.id
            FOR UPDATE OF p
            ",
        )
        .bind(session.as_str())
        .fetch_all(&mut *tx)
        .await?;

        if cart.is_empty() {
            return Err(PlaceOrderError::EmptyCart);
        }

        for line in &cart {
            if line.quantity > line.stock {
                return Err(PlaceOrderError::OutOfStock {
                    product: line.product_name.clone(),
                });
            }
        }

        let total_amount: Decimal = cart
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum();

        let (order_id, created_at) = sqlx::query_as::<_, (i32, DateTime<Utc>)>(
            r"
            INSERT INTO shop.customer_order
                (order_number, customer_name, email, phone, address, city, zip_code,
                 total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, created_at
            ",
        )
        .bind(order_number.as_str())
        .bind(&contact.customer_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.address)
        .bind(&contact.city)
        .bind(&contact.zip_code)
        .bind(total_amount)
        .bind(OrderStatus::Pending.to_string())
        .fetch_one(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(cart.len());
        for line in cart {
            sqlx::query(
                r"
                INSERT INTO shop.order_line (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;

            // Guarded decrement as a second invariant check; under the row
            // lock above it can only fail if the check logic itself is wrong.
            let decremented = sqlx::query(
                r"
                UPDATE shop.product
                SET stock = stock - $1
                WHERE id = $2 AND stock >= $1
                ",
            )
            .bind(line.quantity)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;

            if decremented.rows_affected() == 0 {
                return Err(PlaceOrderError::OutOfStock {
                    product: line.product_name,
                });
            }

            lines.push(OrderLine {
                product_id: ProductId::new(line.product_id),
                product_name: line.product_name,
                quantity: line.quantity,
                unit_price: line.price,
            });
        }

        sqlx::query("DELETE FROM shop.cart_line WHERE session_id = $1")
            .bind(session.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Order {
            id: OrderId::new(order_id),
            order_number: order_number.clone(),
            contact: contact.clone(),
            total_amount,
            status: OrderStatus::Pending,
            created_at,
            lines,
        })
    }

    /// Get an order with its lines and joined product names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored order number
    /// or status is invalid.
    pub async fn get_with_lines(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let header = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, order_number, customer_name, email, phone, address, city,
                   zip_code, total_amount, status, created_at
            FROM shop.customer_order
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT ol.product_id, p.name AS product_name, ol.quantity, ol.unit_price
            FROM shop.order_line ol
            JOIN shop.product p ON p.id = ol.product_id
            WHERE ol.order_id = $1
            ORDER BY ol.id
            ",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let lines = lines.into_iter().map(OrderLine::from).collect();
        header.into_model(lines).map(Some)
    }
}
