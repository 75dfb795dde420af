//! MySQL grammar - resolves accumulated query state into SQL text
//!
//! Pure text generation: the grammar reads a [`QueryState`] and never
//! mutates it. Values are never interpolated into the text; every value
//! position renders as a `?` placeholder matched by the state's bind list.

use super::state::QueryState;
use super::types::QueryType;
use crate::error::{QueryError, QueryResult};

/// Grammar for the MySQL dialect: backtick identifier quoting where the
/// builder renders it and `?` positional placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlGrammar;

impl MysqlGrammar {
    /// Resolve `state` into SQL text, dispatching on its query type.
    /// A state with no query type is an error, never empty text.
    pub fn resolve(&self, state: &QueryState) -> QueryResult<String> {
        match state.query_type {
            Some(QueryType::Select) => Ok(self.select_sql(state)),
            Some(QueryType::Insert) => Ok(self.insert_sql(state)),
            None => Err(QueryError::UnsupportedQueryType),
        }
    }

    fn select_sql(&self, state: &QueryState) -> String {
        let mut sql = String::new();
        sql.push_str("SELECT ");
        sql.push_str(&state.columns.join(", "));
        sql.push_str(&format!(" FROM `{}`", state.table));

        for (kind, clause) in state.active_clauses() {
            sql.push(' ');
            sql.push_str(kind.keyword());
            for (i, condition) in clause.conditions.iter().enumerate() {
                sql.push(' ');
                // Only conditions after the first carry their combinator.
                if i > 0 {
                    sql.push_str(&condition.combinator.to_string());
                    sql.push(' ');
                }
                sql.push_str(&condition.predicate);
            }
        }

        sql
    }

    fn insert_sql(&self, state: &QueryState) -> String {
        let columns: Vec<String> = state
            .insert_keys
            .iter()
            .map(|key| format!("`{}`", key))
            .collect();
        let placeholders = vec!["?"; state.insert_values.len()];

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            state.table,
            columns.join(", "),
            placeholders.join(", "),
        )
    }
}
