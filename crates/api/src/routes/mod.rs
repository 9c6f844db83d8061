//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (DB ping)
//!
//! # Products
//! GET    /products                - Product listing (?category= exact filter)
//! GET    /products/categories     - Distinct category labels
//! GET    /products/{id}           - Product detail
//!
//! # Cart
//! GET    /cart/{session_id}       - Session's cart lines with product data
//! POST   /cart                    - Add to cart (merges on existing line)
//! PUT    /cart/{id}               - Set line quantity (raw integer body)
//! DELETE /cart/{id}               - Remove line
//! DELETE /cart/clear/{session_id} - Clear session's cart
//!
//! # Orders
//! POST   /orders                  - Place order from session's cart
//! GET    /orders/{id}             - Order with line items
//! ```

pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
///
/// The `{key}` segment is a session ID for GET and a cart line ID for
/// PUT/DELETE, mirroring the shape of the original public API.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(cart::add))
        .route("/clear/{session_id}", delete(cart::clear))
        .route(
            "/{key}",
            get(cart::list).put(cart::update).delete(cart::remove),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create))
        .route("/{id}", get(orders::show))
}

/// Create the complete application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
}
