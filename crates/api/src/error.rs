//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CartError, CheckoutError};

/// Application-level error type for the storefront API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Whether this error is a server fault worth capturing to Sentry, as opposed
/// to a routine 4xx outcome.
fn is_server_error(err: &AppError) -> bool {
    match err {
        AppError::Database(_) | AppError::Internal(_) => true,
        AppError::Cart(CartError::Repository(_))
        | AppError::Checkout(CheckoutError::Repository(_)) => true,
        _ => false,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if is_server_error(&self) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Cart(err) => match err {
                CartError::ProductNotFound | CartError::LineNotFound => StatusCode::NOT_FOUND,
                CartError::InvalidQuantity | CartError::InsufficientStock { .. } => {
                    StatusCode::BAD_REQUEST
                }
                CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::OrderNotFound => StatusCode::NOT_FOUND,
                CheckoutError::EmptyCart
                | CheckoutError::InvalidContact(_)
                | CheckoutError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
                CheckoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_)
            | Self::Internal(_)
            | Self::Cart(CartError::Repository(_))
            | Self::Checkout(CheckoutError::Repository(_)) => "Internal server error".to_string(),
            Self::Cart(err) => match err {
                CartError::ProductNotFound => "Product not found".to_string(),
                CartError::LineNotFound => "Cart item not found".to_string(),
                CartError::InvalidQuantity => "Quantity must be positive".to_string(),
                CartError::InsufficientStock { product } => {
                    format!("Insufficient stock for {product}")
                }
                CartError::Repository(_) => unreachable!("handled above"),
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Cart is empty".to_string(),
                CheckoutError::InvalidContact(msg) => msg.clone(),
                CheckoutError::InsufficientStock { product } => {
                    format!("Insufficient stock for {product}")
                }
                CheckoutError::OrderNotFound => "Order not found".to_string(),
                CheckoutError::Repository(_) => unreachable!("handled above"),
            },
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
