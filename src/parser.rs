//! Classification of a condition object into the compiled plan.
//!
//! Parsing never fails. Operands with the wrong shape become `Invalid` nodes
//! that carry the error [`validate`](crate::validate) would report.

use rust_decimal::prelude::ToPrimitive;

use crate::{
    ast::{AllOperand, Clause, Condition, ElemMatch, Expression, LogicalOp, Negation, Operator, OperatorTag, Predicate},
    path::Path,
    validate::ValidationError,
    value::{Map, Pattern, Value},
};

const ELEM_MATCH_KEY: &str = "$elemMatch";
const OPTIONS_KEY: &str = "$options";
const REGEX_KEY: &str = "$regex";

/// Compile a whole query. The root must be an object.
///
/// # Examples
///
/// ```
/// use docmatch::ast::{Clause, Predicate};
/// use docmatch::parser::parse_query;
/// use docmatch::Value;
///
/// let query: Value = [("foo", Value::from("bar"))].into_iter().collect();
/// let condition = parse_query(&query);
///
/// assert!(matches!(
///     condition.clauses[0],
///     Clause::Field { predicate: Predicate::Literal(_), .. }
/// ));
/// ```
pub fn parse_query(query: &Value) -> Condition {
    match query {
        Value::Object(map) => parse_condition(map),
        other => Condition {
            clauses: vec![invalid_clause(ValidationError::RootNotObject {
                found: other.kind_name(),
            })],
        },
    }
}

/// Compile one condition object.
pub fn parse_condition(map: &Map) -> Condition {
    Condition {
        clauses: map
            .iter()
            .map(|(key, value)| parse_clause(key, value))
            .collect(),
    }
}

/// True when `map` is non-empty and every key is a field-operator tag.
pub fn is_expression(map: &Map) -> bool {
    !map.is_empty() && map.keys().all(|key| OperatorTag::from_key(key).is_some())
}

fn parse_clause(key: &str, value: &Value) -> Clause {
    if let Some(op) = LogicalOp::from_key(key) {
        return parse_logical(op, value);
    }

    let predicate = match value {
        Value::Object(map) if is_expression(map) => {
            Predicate::Expression(parse_expression(map, key))
        }
        literal => Predicate::Literal(literal.clone()),
    };

    Clause::Field {
        path: Path::parse(key),
        predicate,
    }
}

fn parse_logical(op: LogicalOp, value: &Value) -> Clause {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return invalid_clause(ValidationError::LogicalOperand {
                operator: op,
                found: other.kind_name(),
            });
        }
    };

    let mut conditions = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(map) => conditions.push(parse_condition(map)),
            other => {
                return invalid_clause(ValidationError::LogicalElement {
                    operator: op,
                    index,
                    found: other.kind_name(),
                });
            }
        }
    }

    Clause::Logical { op, conditions }
}

/// Compile an expression object applied to `field`.
///
/// `$regex` and `$options` are merged into a single operator.
pub fn parse_expression(map: &Map, field: &str) -> Expression {
    let mut operators = Vec::with_capacity(map.len());

    for (key, operand) in map {
        let Some(tag) = OperatorTag::from_key(key) else {
            continue;
        };

        let operator = match tag {
            OperatorTag::Eq => Operator::Eq(operand.clone()),
            OperatorTag::Ne => Operator::Ne(operand.clone()),
            OperatorTag::Gt => Operator::Gt(operand.clone()),
            OperatorTag::Gte => Operator::Gte(operand.clone()),
            OperatorTag::Lt => Operator::Lt(operand.clone()),
            OperatorTag::Lte => Operator::Lte(operand.clone()),
            OperatorTag::In => match operand {
                Value::Array(items) => Operator::In(items.clone()),
                other => invalid(not_a_list(tag, field, other)),
            },
            OperatorTag::Nin => match operand {
                Value::Array(items) => Operator::Nin(items.clone()),
                other => invalid(not_a_list(tag, field, other)),
            },
            OperatorTag::Not => parse_not(operand, field),
            OperatorTag::Exists => Operator::Exists(operand.is_truthy()),
            OperatorTag::Regex => parse_regex(operand, map.get(OPTIONS_KEY), field),
            OperatorTag::Options => {
                if map.contains_key(REGEX_KEY) {
                    continue;
                }
                invalid(ValidationError::OptionsWithoutRegex {
                    field: field.to_string(),
                })
            }
            OperatorTag::Mod => parse_mod(operand, field),
            OperatorTag::Size => parse_size(operand, field),
            OperatorTag::All => parse_all(operand, field),
            OperatorTag::ElemMatch => match parse_elem_match(operand, field) {
                Ok(elem_match) => Operator::ElemMatch(elem_match),
                Err(err) => invalid(err),
            },
        };

        operators.push(operator);
    }

    Expression { operators }
}

fn parse_not(operand: &Value, field: &str) -> Operator {
    match operand {
        Value::Regex(pattern) => Operator::Not(Negation::Pattern(pattern.clone())),
        Value::Object(map) if is_expression(map) => {
            Operator::Not(Negation::Expression(parse_expression(map, field)))
        }
        other => invalid(ValidationError::NotOperand {
            field: field.to_string(),
            found: other.kind_name(),
        }),
    }
}

fn parse_regex(operand: &Value, options: Option<&Value>, field: &str) -> Operator {
    let options = match options {
        None => None,
        Some(Value::String(flags)) => Some(flags.as_str()),
        Some(other) => {
            return invalid(ValidationError::RegexSyntax {
                field: field.to_string(),
                message: format!("$options must be a string, got {}", other.kind_name()),
            });
        }
    };

    let compiled = match operand {
        Value::String(source) => Pattern::new(source, options.unwrap_or("")),
        Value::Regex(pattern) => Pattern::new(
            pattern.source(),
            options.unwrap_or_else(|| pattern.options()),
        ),
        other => {
            return invalid(ValidationError::RegexOperand {
                field: field.to_string(),
                found: other.kind_name(),
            });
        }
    };

    match compiled {
        Ok(pattern) => Operator::Regex(pattern),
        Err(err) => invalid(ValidationError::RegexSyntax {
            field: field.to_string(),
            message: err.to_string(),
        }),
    }
}

fn parse_mod(operand: &Value, field: &str) -> Operator {
    let mod_error = |reason| {
        invalid(ValidationError::ModOperand {
            field: field.to_string(),
            reason,
        })
    };

    let items = match operand {
        Value::Array(items) => items,
        _ => return mod_error("requires a [divisor, remainder] list"),
    };

    let [divisor, remainder] = items.as_slice() else {
        return mod_error("requires exactly two elements");
    };

    match (floor_to_i64(divisor), floor_to_i64(remainder)) {
        (Ok(0), Ok(_)) => mod_error("divisor must not be zero"),
        (Ok(divisor), Ok(remainder)) => Operator::Mod { divisor, remainder },
        (Err(reason), _) | (_, Err(reason)) => mod_error(reason),
    }
}

/// Floors a numeric operand, refusing anything an `i64` cannot hold.
fn floor_to_i64(value: &Value) -> Result<i64, &'static str> {
    const OUT_OF_RANGE: &str = "out of range";
    match value {
        Value::Integer(n) => Ok(*n),
        Value::Float(n) if n.is_finite() => {
            let floored = n.floor();
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            if floored >= -(i64::MIN as f64) || floored < i64::MIN as f64 {
                Err(OUT_OF_RANGE)
            } else {
                Ok(floored as i64)
            }
        }
        Value::Float(_) => Err(OUT_OF_RANGE),
        Value::Decimal(d) => d.floor().to_i64().ok_or(OUT_OF_RANGE),
        _ => Err("divisor and remainder must be numbers"),
    }
}

fn parse_size(operand: &Value, field: &str) -> Operator {
    let size = match operand {
        Value::Integer(n) => Ok(*n as f64),
        Value::Float(n) if n.is_finite() => Ok(*n),
        Value::Decimal(d) => d.to_f64().ok_or("is out of range"),
        _ => Err("requires a number"),
    }
    .and_then(|n| {
        if n < 0.0 {
            Err("must not be negative")
        } else if n.fract() != 0.0 {
            Err("must be a whole number")
        } else {
            Ok(n as usize)
        }
    });

    match size {
        Ok(n) => Operator::Size(n),
        Err(reason) => invalid(ValidationError::SizeOperand {
            field: field.to_string(),
            reason,
        }),
    }
}

fn parse_all(operand: &Value, field: &str) -> Operator {
    let items = match operand {
        Value::Array(items) => items,
        other => return invalid(not_a_list(OperatorTag::All, field, other)),
    };

    let wrapper_shaped = items
        .iter()
        .any(|item| matches!(item, Value::Object(map) if map.contains_key(ELEM_MATCH_KEY)));
    if !wrapper_shaped {
        return Operator::All(AllOperand::Values(items.clone()));
    }

    let mut wrappers = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let inner = match item {
            Value::Object(map) if map.len() == 1 => map.get(ELEM_MATCH_KEY),
            _ => None,
        };
        let Some(inner) = inner else {
            return invalid(ValidationError::AllElemMatchShape {
                field: field.to_string(),
                index,
            });
        };
        match parse_elem_match(inner, field) {
            Ok(elem_match) => wrappers.push(elem_match),
            Err(err) => return invalid(err),
        }
    }

    Operator::All(AllOperand::ElemMatches(wrappers))
}

fn parse_elem_match(operand: &Value, field: &str) -> Result<ElemMatch, ValidationError> {
    match operand {
        Value::Object(map) if is_expression(map) => {
            Ok(ElemMatch::Expression(parse_expression(map, field)))
        }
        Value::Object(map) => Ok(ElemMatch::Condition(parse_condition(map))),
        other => Err(ValidationError::ElemMatchOperand {
            field: field.to_string(),
            found: other.kind_name(),
        }),
    }
}

fn not_a_list(operator: OperatorTag, field: &str, found: &Value) -> ValidationError {
    ValidationError::OperandNotList {
        operator,
        field: field.to_string(),
        found: found.kind_name(),
    }
}

fn invalid(err: ValidationError) -> Operator {
    tracing::debug!(%err, "malformed operand, operator will not match");
    Operator::Invalid(err)
}

fn invalid_clause(err: ValidationError) -> Clause {
    tracing::debug!(%err, "malformed clause, clause will not match");
    Clause::Invalid(err)
}
