//! Query builder types - query kinds, operators, clauses and conditions

use serde_json::Value;
use std::fmt;

/// Query types supported by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Select => write!(f, "SELECT"),
            QueryType::Insert => write!(f, "INSERT"),
        }
    }
}

/// Query operator types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    NotLike,
}

impl QueryOperator {
    /// Parse an operator from its SQL symbol. Unknown symbols are rejected
    /// rather than silently mapped to equality.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(QueryOperator::Equal),
            "!=" | "<>" => Some(QueryOperator::NotEqual),
            ">" => Some(QueryOperator::GreaterThan),
            ">=" => Some(QueryOperator::GreaterThanOrEqual),
            "<" => Some(QueryOperator::LessThan),
            "<=" => Some(QueryOperator::LessThanOrEqual),
            "LIKE" => Some(QueryOperator::Like),
            "NOT LIKE" => Some(QueryOperator::NotLike),
            _ => None,
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOperator::Equal => write!(f, "="),
            QueryOperator::NotEqual => write!(f, "!="),
            QueryOperator::GreaterThan => write!(f, ">"),
            QueryOperator::GreaterThanOrEqual => write!(f, ">="),
            QueryOperator::LessThan => write!(f, "<"),
            QueryOperator::LessThanOrEqual => write!(f, "<="),
            QueryOperator::Like => write!(f, "LIKE"),
            QueryOperator::NotLike => write!(f, "NOT LIKE"),
        }
    }
}

/// Combinator linking a condition to the previous one in the same clause.
/// The first condition of a clause never emits its combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// Order by direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "ASC"),
            OrderDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Clause kinds, declared in the order their keywords are emitted.
///
/// `Having` and `Join` exist in the state shape but have no public surface;
/// both features are out of scope for this builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Where,
    OrderBy,
    GroupBy,
    Having,
    Join,
}

impl ClauseKind {
    /// All clause kinds in emission order. Output clause ordering follows
    /// this declaration order regardless of the order calls were chained.
    pub const ALL: [ClauseKind; 5] = [
        ClauseKind::Where,
        ClauseKind::OrderBy,
        ClauseKind::GroupBy,
        ClauseKind::Having,
        ClauseKind::Join,
    ];

    /// SQL keyword for this clause
    pub fn keyword(&self) -> &'static str {
        match self {
            ClauseKind::Where => "WHERE",
            ClauseKind::OrderBy => "ORDER BY",
            ClauseKind::GroupBy => "GROUP BY",
            ClauseKind::Having => "HAVING",
            ClauseKind::Join => "JOIN",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ClauseKind::Where => 0,
            ClauseKind::OrderBy => 1,
            ClauseKind::GroupBy => 2,
            ClauseKind::Having => 3,
            ClauseKind::Join => 4,
        }
    }
}

/// One predicate within a clause
#[derive(Debug, Clone)]
pub struct Condition {
    /// Rendered predicate text, e.g. `` `field` = ? ``
    pub predicate: String,
    /// The value bound to the predicate's placeholder, if it carries one
    pub value: Option<Value>,
    pub combinator: Combinator,
}

/// Accumulated state of one clause kind
#[derive(Debug, Clone, Default)]
pub struct ClauseState {
    /// Activation is monotonic: once set it stays set until the state resets
    pub active: bool,
    pub conditions: Vec<Condition>,
}
