use crate::{
    ast::Condition,
    evaluator::Evaluator,
    parser::parse_query,
    validate::{ValidationError, validate_condition},
    value::Value,
};

/// An immutable matcher built from a Mongo-style condition object.
///
/// Construction compiles the condition once and never fails. Malformed
/// operands simply never match; call [`Query::validate`] to reject them up
/// front instead.
///
/// # Examples
///
/// ```
/// use docmatch::{Query, Value};
///
/// let query = Query::new(
///     [("foo", Value::from("bar")), ("baz", Value::Integer(2))]
///         .into_iter()
///         .collect::<Value>(),
/// );
///
/// let hit: Value = [("foo", Value::from("bar")), ("baz", Value::Integer(2))]
///     .into_iter()
///     .collect();
/// let miss: Value = [("foo", Value::from("bar")), ("baz", Value::Integer(3))]
///     .into_iter()
///     .collect();
///
/// assert!(query.matches(&hit));
/// assert!(!query.matches(&miss));
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    condition: Condition,
    evaluator: Evaluator,
}

impl Query {
    pub fn new(condition: impl Into<Value>) -> Self {
        Query {
            condition: parse_query(&condition.into()),
            evaluator: Evaluator::new(),
        }
    }

    /// Tests `document` against the query. Never panics.
    pub fn matches(&self, document: &Value) -> bool {
        self.evaluator.eval_condition(&self.condition, document)
    }

    /// Checks the structure of the query, reporting the first violation.
    ///
    /// ```
    /// use docmatch::{Query, ValidationError, Value};
    ///
    /// let bad = Query::new(
    ///     [("$and", Value::Integer(1))].into_iter().collect::<Value>(),
    /// );
    /// assert!(matches!(bad.validate(), Err(ValidationError::LogicalOperand { .. })));
    /// ```
    pub fn validate(self) -> Result<Self, ValidationError> {
        if let Err(err) = validate_condition(&self.condition) {
            tracing::trace!(%err, "query rejected by validation");
            return Err(err);
        }
        Ok(self)
    }

    /// Keeps the documents that match, in their original order.
    pub fn filter<'a, I>(&'a self, documents: I) -> impl Iterator<Item = &'a Value> + 'a
    where
        I: IntoIterator<Item = &'a Value>,
        I::IntoIter: 'a,
    {
        documents
            .into_iter()
            .filter(move |document| self.matches(document))
    }

    /// The compiled plan.
    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

