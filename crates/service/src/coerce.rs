//! Integer coercion for numeric form fields.
//!
//! Clients send `price` and `duration` either as JSON numbers or as strings
//! (multipart forms only carry strings). Strings are read with leading-integer
//! semantics: surrounding whitespace, an optional sign, then digits up to the
//! first non-digit.

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A numeric field as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Number(serde_json::Number),
    Text(String),
}

impl IntInput {
    /// Resolve to an integer or fail with a validation error naming `field`.
    pub fn resolve(&self, field: &str) -> Result<i64, ServiceError> {
        let parsed = match self {
            IntInput::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| fits_i64(*f)).map(|f| f.trunc() as i64)),
            IntInput::Text(s) => parse_leading_int(s),
        };
        parsed.ok_or_else(|| ServiceError::Validation(format!("{field} must be an integer")))
    }
}

impl From<i64> for IntInput {
    fn from(v: i64) -> Self { IntInput::Number(v.into()) }
}

impl From<&str> for IntInput {
    fn from(v: &str) -> Self { IntInput::Text(v.to_string()) }
}

/// Finite and inside `i64`; `i64::MAX as f64` rounds up to 2^63, hence the
/// exclusive upper bound.
fn fits_i64(f: f64) -> bool {
    f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Parse the longest signed digit prefix of `s`; `None` when there are no digits
/// or the value does not fit in `i64`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
