use std::fmt;

/// Field-level operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorTag {
    // Comparison
    /// Equal (`$eq`)
    Eq,
    /// Not equal (`$ne`)
    Ne,
    /// Greater than (`$gt`)
    Gt,
    /// Greater than or equal (`$gte`)
    Gte,
    /// Less than (`$lt`)
    Lt,
    /// Less than or equal (`$lte`)
    Lte,
    /// Member of a list (`$in`)
    In,
    /// Not a member of a list (`$nin`)
    Nin,

    // Logical
    /// Negated expression (`$not`)
    Not,

    // Element
    /// Path resolves to something (`$exists`)
    Exists,

    // Evaluation
    /// Regular expression (`$regex`)
    Regex,
    /// Flags for `$regex` (`$options`)
    Options,
    /// Floored modulo (`$mod`)
    Mod,

    // Array
    /// Array length (`$size`)
    Size,
    /// Array contains every operand element (`$all`)
    All,
    /// Some array element matches a condition (`$elemMatch`)
    ElemMatch,
}

impl OperatorTag {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "$eq" => OperatorTag::Eq,
            "$ne" => OperatorTag::Ne,
            "$gt" => OperatorTag::Gt,
            "$gte" => OperatorTag::Gte,
            "$lt" => OperatorTag::Lt,
            "$lte" => OperatorTag::Lte,
            "$in" => OperatorTag::In,
            "$nin" => OperatorTag::Nin,
            "$not" => OperatorTag::Not,
            "$exists" => OperatorTag::Exists,
            "$regex" => OperatorTag::Regex,
            "$options" => OperatorTag::Options,
            "$mod" => OperatorTag::Mod,
            "$size" => OperatorTag::Size,
            "$all" => OperatorTag::All,
            "$elemMatch" => OperatorTag::ElemMatch,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperatorTag::Eq => "$eq",
            OperatorTag::Ne => "$ne",
            OperatorTag::Gt => "$gt",
            OperatorTag::Gte => "$gte",
            OperatorTag::Lt => "$lt",
            OperatorTag::Lte => "$lte",
            OperatorTag::In => "$in",
            OperatorTag::Nin => "$nin",
            OperatorTag::Not => "$not",
            OperatorTag::Exists => "$exists",
            OperatorTag::Regex => "$regex",
            OperatorTag::Options => "$options",
            OperatorTag::Mod => "$mod",
            OperatorTag::Size => "$size",
            OperatorTag::All => "$all",
            OperatorTag::ElemMatch => "$elemMatch",
        }
    }
}

impl fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical combinators allowed as keys of a condition object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    /// Every sub-condition matches (`$and`)
    And,
    /// At least one sub-condition matches (`$or`)
    Or,
    /// No sub-condition matches (`$nor`)
    Nor,
}

impl LogicalOp {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(LogicalOp::And),
            "$or" => Some(LogicalOp::Or),
            "$nor" => Some(LogicalOp::Nor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
            LogicalOp::Nor => "$nor",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
