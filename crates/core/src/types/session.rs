//! Opaque cart session tokens.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted token length. Client-generated tokens are typically UUIDs;
/// the cap exists to keep arbitrary client input out of the database.
const MAX_TOKEN_LEN: usize = 128;

/// Errors from validating a session token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("session token must not be empty")]
    Empty,
    #[error("session token exceeds {MAX_TOKEN_LEN} characters")]
    TooLong,
}

/// An opaque, client-held string scoping an anonymous shopping cart.
///
/// This is a capability token, not an authenticated identity: any holder of
/// the token can view and mutate the cart it names. It is deliberately a
/// separate type from anything authentication-related so the two can never be
/// confused at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Validate and wrap a raw session token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionTokenError::Empty`] for empty or whitespace-only
    /// input, and [`SessionTokenError::TooLong`] past the length cap.
    pub fn parse(raw: &str) -> Result<Self, SessionTokenError> {
        if raw.trim().is_empty() {
            return Err(SessionTokenError::Empty);
        }
        if raw.len() > MAX_TOKEN_LEN {
            return Err(SessionTokenError::TooLong);
        }
        Ok(Self(raw.to_owned()))
    }

    /// The token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
