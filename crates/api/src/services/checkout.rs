//! Checkout orchestrator service.
//!
//! Converts a session's cart into an immutable order: stock is re-validated
//! at checkout time (never trusted from add-time), the total is computed from
//! current prices, and order creation, stock decrement, and cart clearing
//! commit as one transaction.

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

use greenbasket_core::{
    ORDER_NUMBER_SUFFIX_LEN, OrderId, OrderNumber, SessionToken,
};

use crate::db::{OrderRepository, PlaceOrderError, RepositoryError};
use crate::models::{ContactDetails, Order};

/// Alphabet for order-number suffixes.
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Errors that can occur during checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The session has no cart lines to convert.
    #[error("cart is empty")]
    EmptyCart,

    /// A required contact field is missing or malformed.
    #[error("invalid contact details: {0}")]
    InvalidContact(String),

    /// A cart line's quantity exceeds the product's current stock.
    #[error("insufficient stock for {product}")]
    InsufficientStock { product: String },

    /// Order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<PlaceOrderError> for CheckoutError {
    fn from(err: PlaceOrderError) -> Self {
        match err {
            PlaceOrderError::EmptyCart => Self::EmptyCart,
            PlaceOrderError::OutOfStock { product } => Self::InsufficientStock { product },
            PlaceOrderError::Database(e) => Self::Repository(RepositoryError::Database(e)),
        }
    }
}

/// Checkout orchestrator service.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Place an order from a session's cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidContact` for missing/malformed contact
    /// fields, `CheckoutError::EmptyCart` when the session has no lines, and
    /// `CheckoutError::InsufficientStock` when any line exceeds current
    /// stock. On error nothing is mutated.
    pub async fn place_order(
        &self,
        session: &SessionToken,
        contact: ContactDetails,
    ) -> Result<Order, CheckoutError> {
        validate_contact(&contact)?;

        let order_number = generate_order_number();
        let order = self
            .orders
            .place_order(session, &contact, &order_number)
            .await?;

        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            total = %order.total_amount,
            lines = order.lines.len(),
            "order placed"
        );

        Ok(order)
    }

    /// Get an order with its lines and joined product names.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::OrderNotFound` for unknown ids.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, CheckoutError> {
        self.orders
            .get_with_lines(id)
            .await?
            .ok_or(CheckoutError::OrderNotFound)
    }
}

/// Generate an order number for today's UTC date with a random suffix.
///
/// Collisions are accepted as negligible (36^8 suffixes per day) and not
/// checked against existing orders; the database's unique constraint is the
/// backstop.
fn generate_order_number() -> OrderNumber {
    let mut rng = rand::rng();
    let suffix: String = (0..ORDER_NUMBER_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARSET.len());
            char::from(SUFFIX_CHARSET[idx])
        })
        .collect();

    OrderNumber::compose(Utc::now().date_naive(), &suffix)
        .unwrap_or_else(|_| unreachable!("generated suffix is always valid"))
}

/// Validate checkout contact fields: all required, email must look like an
/// email. No deeper validation by design - the form layer owns UX-level
/// checks.
fn validate_contact(contact: &ContactDetails) -> Result<(), CheckoutError> {
    let required = [
        ("customerName", &contact.customer_name),
        ("email", &contact.email),
        ("phone", &contact.phone),
        ("address", &contact.address),
        ("city", &contact.city),
        ("zipCode", &contact.zip_code),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::InvalidContact(format!(
                "{field} is required"
            )));
        }
    }

    if !looks_like_email(&contact.email) {
        return Err(CheckoutError::InvalidContact(
            "email is not a valid address".to_string(),
        ));
    }

    Ok(())
}

/// Minimal email shape check: something@something.something.
fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            customer_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            zip_code: "EC1A".to_string(),
        }
    }

    #[test]
    fn test_generated_order_number_matches_pattern() {
        for _ in 0..100 {
            let number = generate_order_number();
            // Re-parsing enforces ORD-\d{8}-[A-Z0-9]{8}
            assert!(OrderNumber::parse(number.as_str()).is_ok(), "{number}");
        }
    }

    #[test]
    fn test_validate_contact_accepts_complete_details() {
        assert!(validate_contact(&contact()).is_ok());
    }

    #[test]
    fn test_validate_contact_rejects_empty_field() {
        let mut c = contact();
        c.city = "   ".to_string();
        let err = validate_contact(&c).expect_err("empty city");
        assert!(matches!(err, CheckoutError::InvalidContact(msg) if msg.contains("city")));
    }

    #[test]
    fn test_validate_contact_rejects_bad_email() {
        let mut c = contact();
        c.email = "not-an-email".to_string();
        assert!(validate_contact(&c).is_err());

        c.email = "a@b".to_string();
        assert!(validate_contact(&c).is_err());
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("user@example.com"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("user@.com"));
        assert!(!looks_like_email("user@com."));
    }
}
