use std::fmt;

use crate::value::Value;

/// One segment of a dotted field path.
///
/// Segments made only of ASCII digits are also candidate array indices; on
/// an object they are still looked up as ordinary keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    key: String,
    index: Option<usize>,
}

impl Segment {
    pub fn new(key: &str) -> Self {
        let index = if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            key.parse().ok()
        } else {
            None
        };

        Segment {
            key: key.to_string(),
            index,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// A field reference split on `.` once, at query construction.
///
/// # Examples
///
/// - `"foo"` → `[foo]`
/// - `"fruits.0.type"` → `[fruits, 0 (index), type]`
///
/// The root path, with no segments, comes from [`Path::root`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn parse(field: &str) -> Self {
        Path {
            segments: field.split('.').map(Segment::new).collect(),
        }
    }

    /// The empty path, addressing the value itself.
    pub fn root() -> Self {
        Path::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.segments.iter().map(Segment::key).collect();
        write!(f, "{}", keys.join("."))
    }
}

/// How the resolved value is handed to the leaf predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// The leaf also matches when any element of a resolved array matches,
    /// recursively. Used by the equality, relational, set-membership and
    /// evaluation operators.
    AnyElement,

    /// The leaf sees the resolved value only. Used by the operators that
    /// inspect an array as a whole (`$size`, `$all`, `$elemMatch`).
    WholeValue,
}

/// Resolve `path` against `value` and apply `leaf` where it lands.
///
/// 1. Empty path: `leaf(value)`, unioned with every element when `value` is
///    an array and `traversal` is [`Traversal::AnyElement`].
/// 2. Object holding the next key: descend into it.
/// 3. Array and the next segment is an in-bounds index: descend into that
///    element.
/// 4. Any other array: retry the same path on every element, unioned.
/// 5. Otherwise the path is missing and `missing` is returned.
///
/// # Examples
///
/// ```
/// use docmatch::path::{resolve, Path, Traversal};
/// use docmatch::Value;
///
/// let doc: Value = [("a", Value::Array(vec![
///     [("b", Value::Integer(1))].into_iter().collect(),
///     [("b", Value::Integer(2))].into_iter().collect(),
/// ]))].into_iter().collect();
///
/// let path = Path::parse("a.b");
/// let found = resolve(&doc, path.segments(), Traversal::AnyElement, false, &|v| {
///     *v == Value::Integer(2)
/// });
/// assert!(found);
/// ```
pub fn resolve<F>(
    value: &Value,
    path: &[Segment],
    traversal: Traversal,
    missing: bool,
    leaf: &F,
) -> bool
where
    F: Fn(&Value) -> bool,
{
    let Some((segment, rest)) = path.split_first() else {
        if leaf(value) {
            return true;
        }
        return match (traversal, value) {
            (Traversal::AnyElement, Value::Array(items)) => items
                .iter()
                .any(|item| resolve(item, path, traversal, missing, leaf)),
            _ => false,
        };
    };

    match value {
        Value::Object(map) => match map.get(segment.key()) {
            Some(child) => resolve(child, rest, traversal, missing, leaf),
            None => missing,
        },
        Value::Array(items) => match segment.index().and_then(|i| items.get(i)) {
            Some(child) => resolve(child, rest, traversal, missing, leaf),
            None => items
                .iter()
                .any(|item| resolve(item, path, traversal, missing, leaf)),
        },
        _ => missing,
    }
}
