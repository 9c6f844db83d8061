//! Domain services.
//!
//! - [`cart`] - cart reconciliation against current stock
//! - [`checkout`] - atomic conversion of a cart into an order

pub mod cart;
pub mod checkout;

pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutService};
