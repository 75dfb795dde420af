//! Statement execution boundary and the sqlx-backed MySQL executor
//!
//! The facade only needs one capability from the database layer: run SQL
//! text with positionally bound values and hand back rows. Anything that
//! can do that implements [`StatementExecutor`]; [`MySqlExecutor`] is the
//! production implementation over a sqlx connection pool.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::mysql::{MySql, MySqlArguments, MySqlPool, MySqlRow};
use sqlx::{Column, Row as SqlxRow};

use crate::error::{QueryError, QueryResult};

/// One result record: column name to value. The core never interprets
/// record contents.
pub type Row = Map<String, Value>;

/// Capability to execute one parameterized statement.
///
/// Implementations are injected into [`Query::new`](crate::Query::new);
/// there is no ambient global connection. Failures must be reported, never
/// swallowed and never allowed to terminate the process.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, sql: &str, bindings: &[Value]) -> QueryResult<Vec<Row>>;
}

/// Statement executor backed by a sqlx MySQL connection pool
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    /// Connect to the given MySQL URL, e.g. `mysql://root@127.0.0.1/deneme`.
    pub async fn connect(url: &str) -> QueryResult<Self> {
        let pool = MySqlPool::connect(url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementExecutor for MySqlExecutor {
    async fn execute(&self, sql: &str, bindings: &[Value]) -> QueryResult<Vec<Row>> {
        let mut query = sqlx::query(sql);
        for value in bindings {
            query = bind_value(query, value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|err| {
            tracing::error!("Statement execution failed: {}", err);
            QueryError::from(err)
        })?;

        Ok(rows.iter().map(row_to_record).collect())
    }
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> sqlx::query::Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(u) = n.as_u64() {
                query.bind(u)
            } else {
                query.bind(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => query.bind(s.clone()),
        // Arrays and objects travel as their JSON text.
        other => query.bind(other.to_string()),
    }
}

fn row_to_record(row: &MySqlRow) -> Row {
    let mut record = Row::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = if let Ok(v) = row.try_get::<Option<i64>, _>(i) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<f64>, _>(i) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<bool>, _>(i) {
            v.map(Value::from).unwrap_or(Value::Null)
        } else if let Ok(v) = row.try_get::<Option<String>, _>(i) {
            v.map(Value::String).unwrap_or(Value::Null)
        } else {
            Value::Null
        };
        record.insert(column.name().to_string(), value);
    }
    record
}
