//! Human-readable order numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the random suffix in an order number.
pub const ORDER_NUMBER_SUFFIX_LEN: usize = 8;

/// Errors that can occur when parsing an order number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderNumberError {
    #[error("order number must start with 'ORD-'")]
    MissingPrefix,
    #[error("order number date segment must be 8 digits")]
    InvalidDate,
    #[error("order number suffix must be {ORDER_NUMBER_SUFFIX_LEN} uppercase alphanumerics")]
    InvalidSuffix,
}

/// A human-readable, unique order identifier.
///
/// Format: `ORD-<yyyymmdd>-<8 uppercase alphanumerics>`, e.g.
/// `ORD-20260830-7Q1ZK9RD`. The date is the UTC creation date; the suffix is
/// random. Uniqueness relies on the suffix's entropy rather than a lookup
/// against existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Build an order number from a UTC date and a pre-generated suffix.
    ///
    /// # Errors
    ///
    /// Returns [`OrderNumberError::InvalidSuffix`] if the suffix is not
    /// exactly [`ORDER_NUMBER_SUFFIX_LEN`] uppercase alphanumerics.
    pub fn compose(date: NaiveDate, suffix: &str) -> Result<Self, OrderNumberError> {
        validate_suffix(suffix)?;
        Ok(Self(format!("ORD-{}-{suffix}", date.format("%Y%m%d"))))
    }

    /// Parse and validate an order number from its string form.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderNumberError`] describing the first malformed segment.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let rest = s.strip_prefix("ORD-").ok_or(OrderNumberError::MissingPrefix)?;
        let (date, suffix) = rest
            .split_once('-')
            .ok_or(OrderNumberError::InvalidDate)?;
        if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::InvalidDate);
        }
        validate_suffix(suffix)?;
        Ok(Self(s.to_owned()))
    }

    /// The order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_suffix(suffix: &str) -> Result<(), OrderNumberError> {
    if suffix.len() != ORDER_NUMBER_SUFFIX_LEN
        || !suffix
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return Err(OrderNumberError::InvalidSuffix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).expect("valid date")
    }

    #[test]
    fn test_compose_formats_date_and_suffix() {
        let number = OrderNumber::compose(date(), "AB12CD34").expect("compose");
        assert_eq!(number.as_str(), "ORD-20260830-AB12CD34");
    }

    #[test]
    fn test_compose_rejects_bad_suffix() {
        assert_eq!(
            OrderNumber::compose(date(), "ab12cd34"),
            Err(OrderNumberError::InvalidSuffix)
        );
        assert_eq!(
            OrderNumber::compose(date(), "AB12CD3"),
            Err(OrderNumberError::InvalidSuffix)
        );
    }

    #[test]
    fn test_parse_accepts_well_formed() {
        let number = OrderNumber::parse("ORD-20260830-7Q1ZK9RD").expect("parse");
        assert_eq!(number.to_string(), "ORD-20260830-7Q1ZK9RD");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            OrderNumber::parse("ORDER-20260830-7Q1ZK9RD"),
            Err(OrderNumberError::MissingPrefix)
        );
        assert_eq!(
            OrderNumber::parse("ORD-2026083-7Q1ZK9RD"),
            Err(OrderNumberError::InvalidDate)
        );
        assert_eq!(
            OrderNumber::parse("ORD-20260830-7q1zk9rd"),
            Err(OrderNumberError::InvalidSuffix)
        );
    }
}
