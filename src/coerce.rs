//! Best-effort pairwise coercion of two scalar operands.
//!
//! Applied right before an equality or relational leaf comparison. The first
//! matching rule wins and a failed conversion leaves the original value in
//! place, so the comparison afterwards simply reports "not equal" or
//! "incomparable".
//!
//! 1. Either side is a decimal: an integer, float or numeric string on the
//!    other side becomes a decimal.
//! 2. One side is a date or timestamp, the other a string: the string is
//!    parsed as ISO-8601 into the same temporal kind. A zoned timestamp lends
//!    its offset to a parsed string that carries none.
//! 3. One side is a UUID, the other a string: the string is parsed as a UUID.

use std::borrow::Cow;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::value::{Timestamp, Value};

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Align the kinds of `a` and `b` so they can be compared directly.
///
/// Never fails. Values that need no conversion are borrowed, not cloned.
///
/// # Examples
///
/// ```
/// use docmatch::coerce::coerce;
/// use docmatch::Value;
/// use rust_decimal::Decimal;
///
/// let x = Value::Decimal(Decimal::from(10));
/// let y = Value::from("9");
/// let (a, b) = coerce(&x, &y);
/// assert_eq!(*b, Value::Decimal(Decimal::from(9)));
/// assert_eq!(*a, Value::Decimal(Decimal::from(10)));
/// ```
pub fn coerce<'a>(a: &'a Value, b: &'a Value) -> (Cow<'a, Value>, Cow<'a, Value>) {
    match (a, b) {
        (Value::Decimal(_), Value::Decimal(_)) => (Cow::Borrowed(a), Cow::Borrowed(b)),
        (Value::Decimal(_), other) => (Cow::Borrowed(a), to_decimal(other)),
        (other, Value::Decimal(_)) => (to_decimal(other), Cow::Borrowed(b)),

        (Value::Date(_), Value::String(s)) => (Cow::Borrowed(a), to_date(s, b)),
        (Value::String(s), Value::Date(_)) => (to_date(s, a), Cow::Borrowed(b)),

        (Value::DateTime(ts), Value::String(s)) => (Cow::Borrowed(a), to_timestamp(s, ts, b)),
        (Value::String(s), Value::DateTime(ts)) => (to_timestamp(s, ts, a), Cow::Borrowed(b)),

        (Value::Uuid(_), Value::String(s)) => (Cow::Borrowed(a), to_uuid(s, b)),
        (Value::String(s), Value::Uuid(_)) => (to_uuid(s, a), Cow::Borrowed(b)),

        _ => (Cow::Borrowed(a), Cow::Borrowed(b)),
    }
}

fn to_decimal(value: &Value) -> Cow<'_, Value> {
    let converted = match value {
        Value::Integer(n) => Some(Decimal::from(*n)),
        // Go through the shortest round-trip text so 0.1 stays 0.1.
        Value::Float(n) if n.is_finite() => parse_decimal(&n.to_string()),
        Value::String(s) => {
            let parsed = parse_decimal(s.trim());
            if parsed.is_none() {
                tracing::trace!(text = %s, "string is not a decimal");
            }
            parsed
        }
        _ => None,
    };

    match converted {
        Some(d) => Cow::Owned(Value::Decimal(d)),
        None => Cow::Borrowed(value),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

fn to_date<'a>(text: &str, original: &'a Value) -> Cow<'a, Value> {
    match parse_date(text) {
        Some(d) => Cow::Owned(Value::Date(d)),
        None => {
            tracing::trace!(text, "string is not an ISO-8601 date");
            Cow::Borrowed(original)
        }
    }
}

fn to_timestamp<'a>(text: &str, target: &Timestamp, original: &'a Value) -> Cow<'a, Value> {
    match parse_timestamp(text) {
        Some(parsed) => {
            let parsed = match (parsed.offset, target.offset) {
                (None, Some(offset)) => parsed.with_offset(offset),
                _ => parsed,
            };
            Cow::Owned(Value::DateTime(parsed))
        }
        None => {
            tracing::trace!(text, "string is not an ISO-8601 timestamp");
            Cow::Borrowed(original)
        }
    }
}

fn to_uuid<'a>(text: &str, original: &'a Value) -> Cow<'a, Value> {
    match Uuid::parse_str(text) {
        Ok(u) => Cow::Owned(Value::Uuid(u)),
        Err(_) => Cow::Borrowed(original),
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse an ISO-8601 timestamp, zoned or naive. A bare date reads as midnight.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::zoned(dt));
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(Timestamp::zoned(dt));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Timestamp::naive(dt));
        }
    }

    parse_date(text)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Timestamp::naive)
}
