//! Equality and ordering over heterogeneous values.
//!
//! [`compare`] imposes the canonical ordering used by `$gt`, `$gte`, `$lt`
//! and `$lte`. It returns `None` for kind pairs that have no ordering, which
//! relational operators read as "no match".
//!
//! Objects are ordered by walking both key sequences pairwise in insertion
//! order: the first differing key decides (compared as strings), otherwise the
//! first differing value decides, and if one object runs out of keys first it
//! is the smaller one.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::value::{Map, Timestamp, Value};

/// Structural equality. Numbers compare by value across integer, float and
/// decimal; objects compare key-by-key in order.
pub fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::DateTime(x), Value::DateTime(y)) => {
            compare_timestamps(x, y) == Some(Ordering::Equal)
        }
        (Value::Uuid(x), Value::Uuid(y)) => x == y,
        (Value::Regex(x), Value::Regex(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| equals(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .zip(y)
                    .all(|((lk, lv), (rk, rv))| lk == rk && equals(lv, rv))
        }
        (l, r) if l.is_number() && r.is_number() => {
            compare_numbers(l, r) == Some(Ordering::Equal)
        }
        _ => false,
    }
}

/// Canonical ordering of `a` relative to `b`, or `None` when incomparable.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use docmatch::compare::compare;
/// use docmatch::Value;
///
/// assert_eq!(compare(&Value::Integer(2), &Value::Float(1.5)), Some(Ordering::Greater));
/// assert_eq!(compare(&Value::Integer(2), &Value::from("1")), None);
/// ```
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
        (Value::DateTime(x), Value::DateTime(y)) => compare_timestamps(x, y),
        (Value::Uuid(x), Value::Uuid(y)) => Some(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => compare_arrays(x, y),
        (Value::Object(x), Value::Object(y)) => compare_objects(x, y),
        (l, r) if l.is_number() && r.is_number() => compare_numbers(l, r),
        _ => None,
    }
}

/// Lexicographic by element, then by length.
fn compare_arrays(a: &[Value], b: &[Value]) -> Option<Ordering> {
    for (l, r) in a.iter().zip(b) {
        match compare(l, r)? {
            Ordering::Equal => continue,
            decided => return Some(decided),
        }
    }
    Some(a.len().cmp(&b.len()))
}

fn compare_objects(a: &Map, b: &Map) -> Option<Ordering> {
    let mut left = a.iter();
    let mut right = b.iter();

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
            (Some((lk, lv)), Some((rk, rv))) => {
                if lk != rk {
                    return Some(lk.cmp(rk));
                }
                match compare(lv, rv)? {
                    Ordering::Equal => continue,
                    decided => return Some(decided),
                }
            }
        }
    }
}

fn compare_timestamps(a: &Timestamp, b: &Timestamp) -> Option<Ordering> {
    match (a.offset, b.offset) {
        (None, None) => Some(a.naive.cmp(&b.naive)),
        (Some(_), Some(_)) => Some(a.instant()?.cmp(&b.instant()?)),
        _ => None,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
        (Value::Decimal(x), Value::Decimal(y)) => Some(x.cmp(y)),
        (Value::Decimal(x), other) => Some(x.cmp(&as_decimal(other)?)),
        (other, Value::Decimal(y)) => Some(as_decimal(other)?.cmp(y)),
        _ => a.as_float()?.partial_cmp(&b.as_float()?),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Integer(n) => Some(Decimal::from(*n)),
        Value::Float(n) => Decimal::from_f64(*n),
        Value::Decimal(d) => Some(*d),
        _ => None,
    }
}
