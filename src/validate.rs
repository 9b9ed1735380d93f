//! Eager structural check of a compiled query.
//!
//! Matching never fails: a malformed operand only makes its operator
//! non-matching. Validation is the strict path. It walks the plan in
//! document order and reports the first malformed node it finds.

use crate::ast::{AllOperand, Clause, Condition, ElemMatch, Expression, LogicalOp, Negation, Operator, OperatorTag, Predicate};

/// A structural violation in a query, naming the operator and field path.
///
/// `field` is the dotted path the operator was applied to; operators nested in
/// `$elemMatch` report the path of the enclosing array.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("query must be an object, got {found}")]
    RootNotObject { found: &'static str },

    #[error("{operator} requires a list of condition objects, got {found}")]
    LogicalOperand {
        operator: LogicalOp,
        found: &'static str,
    },

    #[error("{operator} element {index} must be a condition object, got {found}")]
    LogicalElement {
        operator: LogicalOp,
        index: usize,
        found: &'static str,
    },

    #[error("{operator} on '{field}' requires a list, got {found}")]
    OperandNotList {
        operator: OperatorTag,
        field: String,
        found: &'static str,
    },

    #[error("$all on '{field}': element {index} must be an {{\"$elemMatch\": {{...}}}} wrapper")]
    AllElemMatchShape { field: String, index: usize },

    #[error("$elemMatch on '{field}' requires a condition object, got {found}")]
    ElemMatchOperand { field: String, found: &'static str },

    #[error("$not on '{field}' requires an operator expression or a regex, got {found}")]
    NotOperand { field: String, found: &'static str },

    #[error("$mod on '{field}': {reason}")]
    ModOperand { field: String, reason: &'static str },

    #[error("$size on '{field}': {reason}")]
    SizeOperand { field: String, reason: &'static str },

    #[error("$regex on '{field}' requires a string, got {found}")]
    RegexOperand { field: String, found: &'static str },

    #[error("$regex on '{field}' does not compile: {message}")]
    RegexSyntax { field: String, message: String },

    #[error("$options on '{field}' requires a $regex")]
    OptionsWithoutRegex { field: String },
}

/// Check `condition` and everything nested in it.
pub fn validate_condition(condition: &Condition) -> Result<(), ValidationError> {
    condition.clauses.iter().try_for_each(validate_clause)
}

fn validate_clause(clause: &Clause) -> Result<(), ValidationError> {
    match clause {
        Clause::Logical { conditions, .. } => conditions.iter().try_for_each(validate_condition),
        Clause::Field {
            predicate: Predicate::Expression(expression),
            ..
        } => validate_expression(expression),
        Clause::Field { .. } => Ok(()),
        Clause::Invalid(err) => Err(err.clone()),
    }
}

fn validate_expression(expression: &Expression) -> Result<(), ValidationError> {
    expression.operators.iter().try_for_each(validate_operator)
}

fn validate_operator(operator: &Operator) -> Result<(), ValidationError> {
    match operator {
        Operator::Invalid(err) => Err(err.clone()),
        Operator::Not(Negation::Expression(inner)) => validate_expression(inner),
        Operator::ElemMatch(elem_match) => validate_elem_match(elem_match),
        Operator::All(AllOperand::ElemMatches(wrappers)) => {
            wrappers.iter().try_for_each(validate_elem_match)
        }
        _ => Ok(()),
    }
}

fn validate_elem_match(elem_match: &ElemMatch) -> Result<(), ValidationError> {
    match elem_match {
        ElemMatch::Condition(condition) => validate_condition(condition),
        ElemMatch::Expression(expression) => validate_expression(expression),
    }
}
