use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::{
    ast::{AllOperand, Clause, Condition, ElemMatch, Expression, LogicalOp, Negation, Operator, Predicate},
    coerce::coerce,
    compare::{compare, equals},
    path::{Path, Segment, Traversal, resolve},
    value::{Pattern, Value},
};

/// Interpreter over the compiled query plan.
///
/// Holds no state: every method is a pure function of the plan and the
/// document, so one evaluator can be shared freely across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

/// Relational operators, which differ only in how they read an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Relation {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Relation::Gt => ordering == Ordering::Greater,
            Relation::Gte => ordering != Ordering::Less,
            Relation::Lt => ordering == Ordering::Less,
            Relation::Lte => ordering != Ordering::Greater,
        }
    }

    /// Only the inclusive operators accept a missing field, and only against
    /// a `null` operand.
    fn matches_missing(self, operand: &Value) -> bool {
        matches!(self, Relation::Gte | Relation::Lte) && operand.is_null()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a compiled condition against a document.
    ///
    /// All clauses are combined with AND; an empty condition matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmatch::evaluator::Evaluator;
    /// use docmatch::parser::parse_query;
    /// use docmatch::Value;
    ///
    /// let query: Value = [("baz", Value::Integer(2))].into_iter().collect();
    /// let doc: Value = [("foo", Value::from("bar")), ("baz", Value::Integer(2))]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let evaluator = Evaluator::new();
    /// assert!(evaluator.eval_condition(&parse_query(&query), &doc));
    /// ```
    pub fn eval_condition(&self, condition: &Condition, document: &Value) -> bool {
        condition
            .clauses
            .iter()
            .all(|clause| self.eval_clause(clause, document))
    }

    fn eval_clause(&self, clause: &Clause, document: &Value) -> bool {
        match clause {
            Clause::Logical { op, conditions } => {
                let mut results = conditions
                    .iter()
                    .map(|condition| self.eval_condition(condition, document));
                match op {
                    LogicalOp::And => results.all(|matched| matched),
                    LogicalOp::Or => results.any(|matched| matched),
                    LogicalOp::Nor => !results.any(|matched| matched),
                }
            }
            Clause::Field { path, predicate } => match predicate {
                Predicate::Literal(operand) => self.eval_eq(document, path.segments(), operand),
                Predicate::Expression(expression) => {
                    self.eval_expression(expression, document, path)
                }
            },
            Clause::Invalid(_) => false,
        }
    }

    /// Evaluates every operator of `expression` at `path`, combined with AND.
    pub fn eval_expression(&self, expression: &Expression, document: &Value, path: &Path) -> bool {
        expression
            .operators
            .iter()
            .all(|operator| self.eval_operator(operator, document, path.segments()))
    }

    fn eval_operator(&self, operator: &Operator, document: &Value, path: &[Segment]) -> bool {
        match operator {
            Operator::Eq(operand) => self.eval_eq(document, path, operand),
            Operator::Ne(operand) => !self.eval_eq(document, path, operand),
            Operator::Gt(operand) => self.eval_relation(document, path, Relation::Gt, operand),
            Operator::Gte(operand) => self.eval_relation(document, path, Relation::Gte, operand),
            Operator::Lt(operand) => self.eval_relation(document, path, Relation::Lt, operand),
            Operator::Lte(operand) => self.eval_relation(document, path, Relation::Lte, operand),
            Operator::In(operands) => self.eval_in(document, path, operands),
            Operator::Nin(operands) => !self.eval_in(document, path, operands),
            Operator::Not(negation) => !self.eval_negation(negation, document, path),
            Operator::Exists(wanted) => {
                resolve(document, path, Traversal::WholeValue, false, &|_| true) == *wanted
            }
            Operator::Regex(pattern) => self.eval_regex(document, path, pattern),
            Operator::Mod { divisor, remainder } => {
                resolve(document, path, Traversal::AnyElement, false, &|value| {
                    floored_mod_matches(value, *divisor, *remainder)
                })
            }
            Operator::Size(size) => {
                resolve(document, path, Traversal::WholeValue, false, &|value| {
                    value.as_array().is_some_and(|items| items.len() == *size)
                })
            }
            Operator::All(operand) => self.eval_all(document, path, operand),
            Operator::ElemMatch(elem_match) => {
                resolve(document, path, Traversal::WholeValue, false, &|value| {
                    value.as_array().is_some_and(|items| {
                        items.iter().any(|item| self.eval_elem_match(elem_match, item))
                    })
                })
            }
            Operator::Invalid(_) => false,
        }
    }

    fn eval_eq(&self, document: &Value, path: &[Segment], operand: &Value) -> bool {
        resolve(document, path, Traversal::AnyElement, operand.is_null(), &|value| {
            leaf_equals(value, operand)
        })
    }

    fn eval_relation(&self, document: &Value, path: &[Segment], relation: Relation, operand: &Value) -> bool {
        resolve(
            document,
            path,
            Traversal::AnyElement,
            relation.matches_missing(operand),
            &|value| {
                let (left, right) = coerce(value, operand);
                compare(&left, &right).is_some_and(|ordering| relation.accepts(ordering))
            },
        )
    }

    fn eval_in(&self, document: &Value, path: &[Segment], operands: &[Value]) -> bool {
        let missing = operands.iter().any(Value::is_null);
        resolve(document, path, Traversal::AnyElement, missing, &|value| {
            operands.iter().any(|operand| leaf_equals(value, operand))
        })
    }

    fn eval_negation(&self, negation: &Negation, document: &Value, path: &[Segment]) -> bool {
        match negation {
            Negation::Expression(expression) => expression
                .operators
                .iter()
                .all(|operator| self.eval_operator(operator, document, path)),
            Negation::Pattern(pattern) => self.eval_regex(document, path, pattern),
        }
    }

    fn eval_regex(&self, document: &Value, path: &[Segment], pattern: &Pattern) -> bool {
        resolve(document, path, Traversal::AnyElement, false, &|value| {
            value.as_str().is_some_and(|text| pattern.is_match(text))
        })
    }

    fn eval_all(&self, document: &Value, path: &[Segment], operand: &AllOperand) -> bool {
        match operand {
            AllOperand::Values(operands) => {
                if operands.is_empty() {
                    return false;
                }
                resolve(document, path, Traversal::WholeValue, false, &|value| {
                    let Some(items) = value.as_array() else {
                        return false;
                    };
                    operands.iter().all(|operand| {
                        items.iter().any(|item| leaf_equals(item, operand))
                            || leaf_equals(value, operand)
                    })
                })
            }
            AllOperand::ElemMatches(wrappers) => {
                resolve(document, path, Traversal::WholeValue, false, &|value| {
                    let Some(items) = value.as_array() else {
                        return false;
                    };
                    wrappers.iter().all(|wrapper| {
                        items.iter().any(|item| self.eval_elem_match(wrapper, item))
                    })
                })
            }
        }
    }

    /// Tests one array element against an `$elemMatch` operand.
    fn eval_elem_match(&self, elem_match: &ElemMatch, element: &Value) -> bool {
        match elem_match {
            ElemMatch::Condition(condition) => self.eval_condition(condition, element),
            ElemMatch::Expression(expression) => {
                self.eval_expression(expression, element, &Path::root())
            }
        }
    }
}

/// `$eq` at a resolved location: a pattern operand searches strings,
/// anything else is coerced and compared structurally.
fn leaf_equals(value: &Value, operand: &Value) -> bool {
    if let (Value::String(text), Value::Regex(pattern)) = (value, operand) {
        return pattern.is_match(text);
    }

    let (left, right) = coerce(value, operand);
    equals(&left, &right)
}

/// Floored modulo: the remainder takes the sign of the divisor.
fn floored_mod_matches(value: &Value, divisor: i64, remainder: i64) -> bool {
    match value {
        Value::Integer(n) => {
            let (n, d) = (i128::from(*n), i128::from(divisor));
            let mut r = n % d;
            if r != 0 && (r < 0) != (d < 0) {
                r += d;
            }
            r == i128::from(remainder)
        }
        Value::Float(n) if n.is_finite() => {
            let d = divisor as f64;
            let mut r = n % d;
            if r != 0.0 && (r < 0.0) != (d < 0.0) {
                r += d;
            }
            r.floor() == remainder as f64
        }
        Value::Decimal(n) => {
            let d = Decimal::from(divisor);
            let mut r = n.checked_rem(d).unwrap_or(Decimal::ZERO);
            if !r.is_zero() && r.is_sign_negative() != d.is_sign_negative() {
                r += d;
            }
            r.floor() == Decimal::from(remainder)
        }
        _ => false,
    }
}
