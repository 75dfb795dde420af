//! Fluent query facade - the chainable public entry point
//!
//! Every chain method consumes and returns the builder, so a finalized
//! query cannot be mutated or reused. The statement executor is injected
//! at construction; there is no ambient global connection.

use std::sync::Arc;

use serde_json::Value;

use super::grammar::MysqlGrammar;
use super::state::QueryState;
use super::types::{ClauseKind, Combinator, OrderDirection, QueryOperator, QueryType};
use crate::error::{QueryError, QueryResult};
use crate::executor::{Row, StatementExecutor};

/// Fluent query builder.
///
/// ```no_run
/// # use std::sync::Arc;
/// # use fluq_query::{MySqlExecutor, OrderDirection, Query, QueryOperator, QueryResult};
/// # async fn run(executor: Arc<MySqlExecutor>) -> QueryResult<()> {
/// let users = Query::new(executor)
///     .table("users")
///     .select(&["id", "name"])
///     .where_cond("id", QueryOperator::GreaterThan, 10)
///     .or_where_eq("name", "emirhan")
///     .order_by("name", OrderDirection::Asc)
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct Query {
    state: QueryState,
    grammar: MysqlGrammar,
    executor: Arc<dyn StatementExecutor>,
    // Chain methods never fail; a conflict or validation error raised
    // mid-chain is parked here and surfaced at finalization.
    pending: Option<QueryError>,
}

impl Query {
    /// Create a builder that will run against the given executor.
    pub fn new(executor: Arc<dyn StatementExecutor>) -> Self {
        Self {
            state: QueryState::new(),
            grammar: MysqlGrammar,
            executor,
            pending: None,
        }
    }

    /// Set the target table. Last write wins.
    pub fn table(mut self, name: &str) -> Self {
        self.state.set_table(name);
        self
    }

    /// Alias of [`table`](Self::table).
    pub fn from(self, name: &str) -> Self {
        self.table(name)
    }

    /// Mark this query as a SELECT over the given columns. An empty slice
    /// selects `*`.
    pub fn select(mut self, columns: &[&str]) -> Self {
        if self.claim_query_type(QueryType::Select) {
            self.state
                .set_select_columns(columns.iter().map(|c| c.to_string()).collect());
        }
        self
    }

    /// Mark this query as an INSERT of the given column/value pairs. Pair
    /// order determines both the column order and the placeholder order.
    pub fn create<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        if self.claim_query_type(QueryType::Insert) {
            let (keys, values): (Vec<String>, Vec<Value>) = fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .unzip();
            if let Err(err) = self.state.set_insert_payload(keys, values) {
                self.pending = Some(err);
            }
        }
        self
    }

    /// Add a WHERE condition, joined to any previous one with AND.
    pub fn where_cond<T: Into<Value>>(
        self,
        column: &str,
        operator: QueryOperator,
        value: T,
    ) -> Self {
        self.push_where(column, operator, value.into(), Combinator::And)
    }

    /// Add a WHERE condition, joined to any previous one with OR.
    pub fn or_where<T: Into<Value>>(
        self,
        column: &str,
        operator: QueryOperator,
        value: T,
    ) -> Self {
        self.push_where(column, operator, value.into(), Combinator::Or)
    }

    /// Equality shorthand for [`where_cond`](Self::where_cond)
    pub fn where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.where_cond(column, QueryOperator::Equal, value)
    }

    /// Equality shorthand for [`or_where`](Self::or_where)
    pub fn or_where_eq<T: Into<Value>>(self, column: &str, value: T) -> Self {
        self.or_where(column, QueryOperator::Equal, value)
    }

    /// Add a WHERE condition with the operator given as its SQL symbol
    /// (`"="`, `">="`, `"LIKE"`, ...), joined with AND. An unknown symbol
    /// parks an [`UnknownOperator`](QueryError::UnknownOperator) error
    /// surfaced at finalization.
    pub fn where_symbol<T: Into<Value>>(self, column: &str, symbol: &str, value: T) -> Self {
        self.push_where_symbol(column, symbol, value.into(), Combinator::And)
    }

    /// Like [`where_symbol`](Self::where_symbol), joined with OR.
    pub fn or_where_symbol<T: Into<Value>>(self, column: &str, symbol: &str, value: T) -> Self {
        self.push_where_symbol(column, symbol, value.into(), Combinator::Or)
    }

    /// Set the ORDER BY clause. A repeat call replaces the previous ordering.
    pub fn order_by(mut self, column: &str, direction: OrderDirection) -> Self {
        self.state
            .set_simple_clause(ClauseKind::OrderBy, format!("{} {}", column, direction));
        self
    }

    /// Set the GROUP BY clause. A repeat call replaces the previous grouping.
    pub fn group_by(mut self, column: &str) -> Self {
        self.state
            .set_simple_clause(ClauseKind::GroupBy, column.to_string());
        self
    }

    /// Resolve the accumulated state into SQL text without executing it.
    pub fn to_sql(&self) -> QueryResult<String> {
        if let Some(err) = &self.pending {
            return Err(err.clone());
        }
        self.grammar.resolve(&self.state)
    }

    /// Values bound to the placeholders of [`to_sql`](Self::to_sql), in
    /// placeholder order
    pub fn bindings(&self) -> &[Value] {
        self.state.bindings()
    }

    /// Resolve the query and run it through the injected executor.
    pub async fn execute(self) -> QueryResult<Vec<Row>> {
        if let Some(err) = self.pending {
            return Err(err);
        }
        let sql = self.grammar.resolve(&self.state)?;
        tracing::debug!(
            "Executing statement with {} bindings: {}",
            self.state.bindings().len(),
            sql
        );
        self.executor.execute(&sql, self.state.bindings()).await
    }

    // The query type may be claimed once per chain; any later claim parks a
    // conflict error and leaves the existing state untouched.
    fn claim_query_type(&mut self, requested: QueryType) -> bool {
        match self.state.query_type() {
            Some(existing) => {
                if self.pending.is_none() {
                    self.pending = Some(QueryError::QueryTypeConflict {
                        existing,
                        requested,
                    });
                }
                false
            }
            None => true,
        }
    }

    fn push_where(
        mut self,
        column: &str,
        operator: QueryOperator,
        value: Value,
        combinator: Combinator,
    ) -> Self {
        // An INSERT never emits conditions; adding one anyway would append
        // a binding with no placeholder to match it.
        if self.state.query_type() == Some(QueryType::Insert) {
            if self.pending.is_none() {
                self.pending = Some(QueryError::ConditionsOnInsert);
            }
            return self;
        }
        let predicate = format!("`{}` {} ?", column, operator);
        self.state
            .add_condition(ClauseKind::Where, predicate, value, combinator);
        self
    }

    fn push_where_symbol(
        mut self,
        column: &str,
        symbol: &str,
        value: Value,
        combinator: Combinator,
    ) -> Self {
        match QueryOperator::from_symbol(symbol) {
            Some(operator) => self.push_where(column, operator, value, combinator),
            None => {
                if self.pending.is_none() {
                    self.pending = Some(QueryError::UnknownOperator(symbol.to_string()));
                }
                self
            }
        }
    }
}
