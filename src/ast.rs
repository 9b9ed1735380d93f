//! # Compiled query plan
//!
//! A condition object is classified once, when a [`Query`](crate::Query) is
//! built, into the closed set of node types defined here. Matching then walks
//! this plan and never re-inspects operator keys.
//!
//! ## Architecture Overview
//!
//! - **[operators]** - The closed operator-tag set (`$eq`, `$gt`, `$and`, ...)
//! - **[condition]** - Condition objects, field predicates and operators
//!
//! ## Condition objects
//!
//! ```text
//! { "fruits.type": { "$eq": "berry", "$ne": "aggregate" }, "fruits": { "$size": 3 } }
//! ```
//!
//! Every key is either a logical combinator (`$and`, `$or`, `$nor`) holding a
//! list of condition objects, or a field path holding an expression or a
//! literal. All keys are combined with AND; an empty object matches every
//! document.
//!
//! ## Expression or literal
//!
//! A map whose keys are *all* operator tags is an expression. Any other value,
//! including a map with a single non-operator key, is a literal matched by
//! equality:
//!
//! ```text
//! { "foo": { "$gt": 1, "$lt": 10 } }     // expression, both operators ANDed
//! { "foo": { "bar": 1, "$size": 2 } }    // literal object
//! { "foo": {} }                          // literal empty object
//! ```
//!
//! ## Malformed operands
//!
//! Operands with the wrong shape compile to `Invalid` nodes carrying the
//! [`ValidationError`](crate::ValidationError) they would raise. Matching
//! treats them as non-matching; [`Query::validate`](crate::Query::validate)
//! reports the first one.
pub mod condition;
pub mod operators;

pub use condition::{AllOperand, Clause, Condition, ElemMatch, Expression, Negation, Operator, Predicate};
pub use operators::{LogicalOp, OperatorTag};
