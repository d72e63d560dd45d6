//! Hardware address types with JSON support.
//!
//! This crate provides two small value types:
//!
//! - [`MacAddress`]: a 6, 8 or 20 octet hardware address (or the empty zero value)
//! - [`MacSet`]: an unordered set of addresses with union and intersection
//!
//! Both serialize through serde. A [`MacAddress`] is a JSON string in canonical
//! lowercase colon form and a [`MacSet`] is a JSON array of such strings.
//!
//! [`MacSet`] does no internal locking. Share one across threads behind a lock
//! held for the whole read or write.

mod mac;
mod set;

pub use mac::MacAddress;
pub use set::MacSet;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid MAC address length: {0} octets (must be 6, 8 or 20)")]
    InvalidLength(usize),

    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Json(err.to_string())
    }
}
