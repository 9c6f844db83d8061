//! Integration tests for Greenbasket.
//!
//! These tests exercise the real HTTP surface against a running server and
//! seeded database, so they are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a database and apply migrations + seed data
//! cargo run -p greenbasket-cli -- migrate
//! cargo run -p greenbasket-cli -- seed
//!
//! # Start the API
//! cargo run -p greenbasket-api
//!
//! # Run the ignored end-to-end tests
//! cargo test -p greenbasket-integration-tests -- --ignored
//! ```

use reqwest::Client;
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed (test-only code).
#[must_use]
pub fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

/// Generate a fresh session token so tests never share carts.
#[must_use]
pub fn fresh_session() -> String {
    Uuid::new_v4().to_string()
}
