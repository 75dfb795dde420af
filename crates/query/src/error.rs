//! Error types for query building and execution
//!
//! All failures are returned to the immediate caller; there is no global
//! error state and no process-terminating path. Only payload validation
//! and finalization (`to_sql`/`execute`) are fallible.

use crate::query::types::QueryType;

/// Result type alias for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Error types for query building and execution
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Resolution was requested before `select()` or `create()` chose a query type
    #[error("no query type set: call select() or create() before finalizing")]
    UnsupportedQueryType,

    /// Insert payload columns and values are not index-aligned
    #[error("malformed insert payload: {keys} columns against {values} values")]
    MalformedInsertPayload { keys: usize, values: usize },

    /// Insert payload must carry at least one column
    #[error("empty insert payload: at least one column is required")]
    EmptyInsertPayload,

    /// WHERE conditions and an insert payload cannot coexist in one query;
    /// allowing both would desynchronize bindings from placeholders
    #[error("conditions cannot be combined with an insert payload")]
    ConditionsOnInsert,

    /// Operator symbol not recognized as a SQL comparison operator
    #[error("unknown operator symbol: {0}")]
    UnknownOperator(String),

    /// The query type may be set once per chain
    #[error("query type already set to {existing}, refusing {requested}")]
    QueryTypeConflict {
        existing: QueryType,
        requested: QueryType,
    },

    /// The statement executor reported a failure
    #[error("statement execution failed: {0}")]
    Execution(String),
}

// Convert from sqlx errors
impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        QueryError::Execution(err.to_string())
    }
}
