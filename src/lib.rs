pub mod ast;
pub mod coerce;
pub mod compare;
#[cfg(feature = "json")]
pub mod convert;
pub mod evaluator;
pub mod parser;
pub mod path;
pub mod query;
pub mod validate;
pub mod value;

pub use ast::{Clause, Condition, Expression, LogicalOp, Operator, OperatorTag, Predicate};
pub use evaluator::Evaluator;
pub use path::Path;
pub use query::Query;
pub use validate::ValidationError;
pub use value::{Map, Pattern, PatternError, Timestamp, Value};
