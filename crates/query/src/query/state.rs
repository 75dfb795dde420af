//! Query state - the mutable accumulator for one query's structural intent
//!
//! One `QueryState` belongs to exactly one query chain. It is mutated by the
//! facade during accumulation, read (never mutated) by the grammar at
//! resolution, and dropped with the chain afterwards.

use serde_json::Value;

use super::types::{ClauseKind, ClauseState, Combinator, Condition, QueryType};
use crate::error::{QueryError, QueryResult};

/// Mutable accumulator for one query: target table, columns, insert payload,
/// per-kind clause slots and the ordered bind list.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub(crate) table: String,
    pub(crate) query_type: Option<QueryType>,
    pub(crate) columns: Vec<String>,
    pub(crate) insert_keys: Vec<String>,
    pub(crate) insert_values: Vec<Value>,
    clauses: [ClauseState; ClauseKind::ALL.len()],
    bindings: Vec<Value>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryState {
    /// Create an empty state. Columns default to `*`.
    pub fn new() -> Self {
        Self {
            table: String::new(),
            query_type: None,
            columns: vec!["*".to_string()],
            insert_keys: Vec::new(),
            insert_values: Vec::new(),
            clauses: Default::default(),
            bindings: Vec::new(),
        }
    }

    /// Clear everything back to the initial state. Callable at any time,
    /// including before first use.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Overwrite the target table. Last write wins; the name passes through
    /// without validation.
    pub fn set_table(&mut self, name: &str) {
        self.table = name.to_string();
    }

    /// Mark the state as a SELECT over the given columns. An empty list
    /// falls back to `*`.
    pub fn set_select_columns(&mut self, columns: Vec<String>) {
        self.query_type = Some(QueryType::Select);
        self.columns = if columns.is_empty() {
            vec!["*".to_string()]
        } else {
            columns
        };
    }

    /// Mark the state as an INSERT of the given parallel key/value lists.
    /// Fails immediately when the lists are not index-aligned, when the
    /// payload is empty, or when WHERE conditions were already added: an
    /// INSERT never emits conditions, so accepting the payload would leave
    /// their bindings without placeholders. A failed call leaves the state
    /// untouched.
    ///
    /// The values become the bind list wholesale: an INSERT's placeholders
    /// are exactly its payload values, in key order.
    pub fn set_insert_payload(&mut self, keys: Vec<String>, values: Vec<Value>) -> QueryResult<()> {
        if keys.len() != values.len() {
            return Err(QueryError::MalformedInsertPayload {
                keys: keys.len(),
                values: values.len(),
            });
        }
        if keys.is_empty() {
            return Err(QueryError::EmptyInsertPayload);
        }
        if self.clauses[ClauseKind::Where.index()].active {
            return Err(QueryError::ConditionsOnInsert);
        }
        self.query_type = Some(QueryType::Insert);
        self.insert_keys = keys;
        self.bindings = values.clone();
        self.insert_values = values;
        Ok(())
    }

    /// Append a condition to a clause, activate the clause and append the
    /// bound value to the bind list. Condition and binding are appended in
    /// the same call so placeholder-to-binding correspondence cannot drift.
    pub fn add_condition(
        &mut self,
        kind: ClauseKind,
        predicate: String,
        value: Value,
        combinator: Combinator,
    ) {
        let clause = &mut self.clauses[kind.index()];
        clause.active = true;
        clause.conditions.push(Condition {
            predicate,
            value: Some(value.clone()),
            combinator,
        });
        self.bindings.push(value);
    }

    /// Activate a single-condition clause (ORDER BY, GROUP BY). The rendered
    /// text carries no placeholder; a repeat call replaces the previous text.
    pub fn set_simple_clause(&mut self, kind: ClauseKind, rendered: String) {
        let clause = &mut self.clauses[kind.index()];
        clause.active = true;
        clause.conditions = vec![Condition {
            predicate: rendered,
            value: None,
            combinator: Combinator::And,
        }];
    }

    /// Active clauses in fixed declaration order (WHERE, ORDER BY, GROUP BY,
    /// HAVING, JOIN), independent of the order calls were made. This order
    /// determines SQL clause ordering and keeps output deterministic.
    pub fn active_clauses(&self) -> impl Iterator<Item = (ClauseKind, &ClauseState)> + '_ {
        ClauseKind::ALL
            .iter()
            .map(|kind| (*kind, &self.clauses[kind.index()]))
            .filter(|(_, clause)| clause.active)
    }

    /// Values bound to placeholders, in placeholder order
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn query_type(&self) -> Option<QueryType> {
        self.query_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reset_is_idempotent_and_safe_before_use() {
        let mut state = QueryState::new();
        state.reset();

        state.set_table("users");
        state.set_select_columns(vec!["id".to_string()]);
        state.add_condition(
            ClauseKind::Where,
            "`id` = ?".to_string(),
            json!(1),
            Combinator::And,
        );
        state.set_simple_clause(ClauseKind::OrderBy, "id ASC".to_string());

        state.reset();
        assert_eq!(state.active_clauses().count(), 0);
        assert!(state.bindings().is_empty());
        assert_eq!(state.table(), "");
        assert_eq!(state.query_type(), None);

        state.reset();
        assert_eq!(state.active_clauses().count(), 0);
    }

    #[test]
    fn test_condition_and_binding_appended_together() {
        let mut state = QueryState::new();
        state.add_condition(
            ClauseKind::Where,
            "`id` = ?".to_string(),
            json!(1),
            Combinator::And,
        );
        state.add_condition(
            ClauseKind::Where,
            "`name` = ?".to_string(),
            json!("x"),
            Combinator::Or,
        );

        let clauses: Vec<_> = state.active_clauses().collect();
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].1.conditions.len(), 2);
        assert_eq!(state.bindings(), &[json!(1), json!("x")]);
    }

    #[test]
    fn test_active_clauses_keep_declaration_order() {
        let mut state = QueryState::new();
        // ORDER BY chained before WHERE must still come out after it.
        state.set_simple_clause(ClauseKind::OrderBy, "id ASC".to_string());
        state.set_simple_clause(ClauseKind::GroupBy, "role".to_string());
        state.add_condition(
            ClauseKind::Where,
            "`id` = ?".to_string(),
            json!(1),
            Combinator::And,
        );

        let kinds: Vec<_> = state.active_clauses().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![ClauseKind::Where, ClauseKind::OrderBy, ClauseKind::GroupBy]
        );
    }

    #[test]
    fn test_simple_clause_last_write_wins() {
        let mut state = QueryState::new();
        state.set_simple_clause(ClauseKind::OrderBy, "id ASC".to_string());
        state.set_simple_clause(ClauseKind::OrderBy, "name DESC".to_string());

        let (_, clause) = state.active_clauses().next().unwrap();
        assert_eq!(clause.conditions.len(), 1);
        assert_eq!(clause.conditions[0].predicate, "name DESC");
    }

    #[test]
    fn test_insert_payload_mismatch_fails_at_set_time() {
        let mut state = QueryState::new();
        let err = state
            .set_insert_payload(
                vec!["id".to_string(), "name".to_string()],
                vec![json!("2")],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::MalformedInsertPayload { keys: 2, values: 1 }
        ));
        // The failed call must not have claimed the query type.
        assert_eq!(state.query_type(), None);
    }

    #[test]
    fn test_empty_insert_payload_is_rejected() {
        let mut state = QueryState::new();
        let err = state
            .set_insert_payload(Vec::new(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, QueryError::EmptyInsertPayload));
        assert_eq!(state.query_type(), None);
    }

    #[test]
    fn test_insert_payload_rejected_when_conditions_exist() {
        let mut state = QueryState::new();
        state.add_condition(
            ClauseKind::Where,
            "`id` = ?".to_string(),
            json!(1),
            Combinator::And,
        );

        let err = state
            .set_insert_payload(vec!["id".to_string()], vec![json!("2")])
            .unwrap_err();
        assert!(matches!(err, QueryError::ConditionsOnInsert));
        // The rejected payload must not have clobbered the condition binding.
        assert_eq!(state.bindings(), &[json!(1)]);
        assert_eq!(state.query_type(), None);
    }

    #[test]
    fn test_insert_payload_values_become_bindings() {
        let mut state = QueryState::new();
        state
            .set_insert_payload(
                vec!["id".to_string(), "name".to_string()],
                vec![json!("2"), json!("test")],
            )
            .unwrap();
        assert_eq!(state.query_type(), Some(QueryType::Insert));
        assert_eq!(state.bindings(), &[json!("2"), json!("test")]);
    }

    #[test]
    fn test_empty_select_columns_default_to_star() {
        let mut state = QueryState::new();
        state.set_select_columns(Vec::new());
        assert_eq!(state.columns, vec!["*".to_string()]);
    }
}
