//! Minimal end-to-end usage against a live MySQL database.
//!
//! ```bash
//! DATABASE_URL=mysql://root@127.0.0.1/deneme cargo run --example basic
//! ```

use std::sync::Arc;

use fluq_query::{MySqlExecutor, OrderDirection, Query, QueryOperator, QueryResult};

#[tokio::main]
async fn main() -> QueryResult<()> {
    tracing_subscriber::fmt::init();

    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "mysql://root@127.0.0.1/deneme".to_string());
    let executor = Arc::new(MySqlExecutor::connect(&url).await?);

    Query::new(executor.clone())
        .table("come")
        .create(vec![("id", "2"), ("name", "test")])
        .execute()
        .await?;

    let rows = Query::new(executor)
        .table("come")
        .select(&[])
        .where_cond("id", QueryOperator::Equal, "2")
        .order_by("name", OrderDirection::Asc)
        .execute()
        .await?;

    for row in rows {
        println!("{:?}", row);
    }

    Ok(())
}
