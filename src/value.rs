use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Ordered map backing [`Value::Object`]. Keys keep their insertion order,
/// which matters for object ordering and equality.
pub type Map = IndexMap<String, Value>;

/// A document value handed to the matcher, or an operand inside a query.
///
/// Documents are always rooted at an `Object` or `Array`; everything below the
/// root may be any variant.
///
/// # Examples
///
/// ```
/// use docmatch::{Map, Value};
///
/// let mut fruit = Map::new();
/// fruit.insert("type".to_string(), Value::from("berry"));
/// fruit.insert("count".to_string(), Value::Integer(3));
///
/// let doc = Value::Object(fruit);
/// assert_eq!(doc.kind_name(), "object");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number (kept apart from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Arbitrary-precision decimal
    Decimal(Decimal),

    /// UTF-8 string
    String(String),

    /// Calendar date without a time component
    Date(NaiveDate),

    /// Date and time, optionally carrying a zone offset
    DateTime(Timestamp),

    /// UUID
    Uuid(Uuid),

    /// Compiled regular expression, usable as an operand
    Regex(Pattern),

    /// Array of values (heterogeneous)
    Array(Vec<Value>),

    /// Object with ordered string keys
    Object(Map),
}

impl Value {
    /// Human-readable kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Regex(_) => "regex",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Check if the value is truthy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Decimal(d) => !d.is_zero(),
            _ => true,
        }
    }

    /// True for integers, floats and decimals. Booleans are not numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        use rust_decimal::prelude::ToPrimitive;

        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A timestamp that is either naive or pinned to a fixed UTC offset.
///
/// Two zoned timestamps compare by instant; two naive ones compare by wall
/// clock. A naive and a zoned timestamp are never equal and never ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub naive: NaiveDateTime,
    pub offset: Option<FixedOffset>,
}

impl Timestamp {
    pub fn naive(naive: NaiveDateTime) -> Self {
        Timestamp { naive, offset: None }
    }

    pub fn zoned(datetime: DateTime<FixedOffset>) -> Self {
        Timestamp {
            naive: datetime.naive_local(),
            offset: Some(*datetime.offset()),
        }
    }

    /// The zoned instant, if this timestamp carries an offset.
    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset?;
        self.naive.and_local_timezone(offset).single()
    }

    /// Same wall clock, pinned to `offset`.
    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Timestamp {
            naive: self.naive,
            offset: Some(offset),
        }
    }
}

/// A compiled regular expression with its source and Mongo-style flags.
///
/// Supported flags: `i` (case-insensitive), `m` (multi-line anchors),
/// `s` (dot matches newline) and `x` (extended, whitespace ignored).
/// Matching is always a substring search.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    options: String,
    regex: Regex,
}

/// Errors raised while building a [`Pattern`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("unsupported regex option '{0}'")]
    UnknownOption(char),

    #[error(transparent)]
    Syntax(#[from] regex::Error),
}

impl Pattern {
    pub fn new(source: &str, options: &str) -> Result<Self, PatternError> {
        let mut builder = RegexBuilder::new(source);
        for flag in options.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                other => return Err(PatternError::UnknownOption(other)),
            };
        }

        Ok(Pattern {
            source: source.to_string(),
            options: options.to_string(),
            regex: builder.build()?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &str {
        &self.options
    }

    /// Substring search, not a full-string match.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.options == other.options
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.options)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(Timestamp::naive(dt))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(Timestamp::zoned(dt))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(Timestamp::zoned(dt.into()))
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::DateTime(ts)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value::Uuid(u)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Regex(p)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
