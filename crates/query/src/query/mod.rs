//! Query building - fluent facade, state accumulator and grammar resolver

pub mod builder;
pub mod grammar;
pub mod state;
pub mod types;

// Re-export main types and builder
pub use builder::Query;
pub use grammar::MysqlGrammar;
pub use state::QueryState;
pub use types::{
    ClauseKind, ClauseState, Combinator, Condition, OrderDirection, QueryOperator, QueryType,
};
