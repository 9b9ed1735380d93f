use crate::{
    ast::{LogicalOp, OperatorTag},
    path::Path,
    validate::ValidationError,
    value::{Pattern, Value},
};

/// A condition object: clauses combined by AND.
///
/// An empty condition matches every document.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    pub clauses: Vec<Clause>,
}

/// One key of a condition object.
#[derive(Debug, Clone)]
pub enum Clause {
    /// `$and` / `$or` / `$nor` over sub-conditions
    Logical {
        op: LogicalOp,
        conditions: Vec<Condition>,
    },

    /// A field path with what it must satisfy
    Field { path: Path, predicate: Predicate },

    /// Malformed clause; never matches
    Invalid(ValidationError),
}

/// What a field path must satisfy.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Implicit `$eq` against a literal value
    Literal(Value),

    /// Operators applied to the same path, combined by AND
    Expression(Expression),
}

/// The operators of one expression object.
#[derive(Debug, Clone, Default)]
pub struct Expression {
    pub operators: Vec<Operator>,
}

/// A compiled field-level operator.
#[derive(Debug, Clone)]
pub enum Operator {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Not(Negation),
    Exists(bool),
    /// `$regex` merged with its `$options`
    Regex(Pattern),
    Mod {
        divisor: i64,
        remainder: i64,
    },
    Size(usize),
    All(AllOperand),
    ElemMatch(ElemMatch),

    /// Malformed operand; never matches
    Invalid(ValidationError),
}

impl Operator {
    pub fn tag(&self) -> Option<OperatorTag> {
        Some(match self {
            Operator::Eq(_) => OperatorTag::Eq,
            Operator::Ne(_) => OperatorTag::Ne,
            Operator::Gt(_) => OperatorTag::Gt,
            Operator::Gte(_) => OperatorTag::Gte,
            Operator::Lt(_) => OperatorTag::Lt,
            Operator::Lte(_) => OperatorTag::Lte,
            Operator::In(_) => OperatorTag::In,
            Operator::Nin(_) => OperatorTag::Nin,
            Operator::Not(_) => OperatorTag::Not,
            Operator::Exists(_) => OperatorTag::Exists,
            Operator::Regex(_) => OperatorTag::Regex,
            Operator::Mod { .. } => OperatorTag::Mod,
            Operator::Size(_) => OperatorTag::Size,
            Operator::All(_) => OperatorTag::All,
            Operator::ElemMatch(_) => OperatorTag::ElemMatch,
            Operator::Invalid(_) => return None,
        })
    }
}

/// Operand of `$not`.
#[derive(Debug, Clone)]
pub enum Negation {
    /// Negated conjunction of the inner operators
    Expression(Expression),

    /// Negated regex match
    Pattern(Pattern),
}

/// Operand of `$all`.
#[derive(Debug, Clone)]
pub enum AllOperand {
    /// The array must contain every value
    Values(Vec<Value>),

    /// Every `{"$elemMatch": ...}` wrapper must be satisfied by some element
    ElemMatches(Vec<ElemMatch>),
}

/// Operand of `$elemMatch`.
#[derive(Debug, Clone)]
pub enum ElemMatch {
    /// Each element is evaluated as a document against the condition
    Condition(Condition),

    /// Each element is tested directly against operator-only keys,
    /// e.g. `{"$gte": 80, "$lt": 85}`
    Expression(Expression),
}
