//! # fluq-query: Fluent SQL query building
//!
//! Separates query *intent accumulation* from *text generation*: the fluent
//! [`Query`] facade mutates a [`QueryState`] through a chain of calls, the
//! [`MysqlGrammar`] resolves that state into parameterized SQL text, and the
//! text plus its ordered bind list is handed to a pluggable
//! [`StatementExecutor`] for execution.
//!
//! A chain owns its state and is consumed by finalization, so one query is
//! never shared across threads or reused after execution. Use a fresh chain
//! per logical query.

pub mod error;
pub mod executor;
pub mod query;

// Re-export core traits and types
pub use error::{QueryError, QueryResult};
pub use executor::{MySqlExecutor, Row, StatementExecutor};
pub use query::{MysqlGrammar, OrderDirection, Query, QueryOperator, QueryState, QueryType};
