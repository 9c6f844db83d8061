//! Core types for Greenbasket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order_number;
pub mod session;
pub mod status;

pub use id::*;
pub use order_number::{ORDER_NUMBER_SUFFIX_LEN, OrderNumber, OrderNumberError};
pub use session::{SessionToken, SessionTokenError};
pub use status::OrderStatus;
