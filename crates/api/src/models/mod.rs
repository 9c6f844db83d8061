//! Domain models for the storefront.
//!
//! These are the in-memory representations of catalog, cart, and order state.
//! Database row shapes live next to the queries in [`crate::db`]; HTTP
//! request/response shapes live next to the handlers in [`crate::routes`].

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{CartLine, CartLineWithProduct};
pub use order::{ContactDetails, Order, OrderLine};
pub use product::{NewProduct, Product};
