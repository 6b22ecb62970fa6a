use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres, Row as _};

use super::filter::{quote_identifier, Filter};
use super::manager::{DatabaseError, DatabaseManager};
use super::store::{Column, Row, SqlValue, Store};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Postgres-backed store. Every statement wraps its result set in
/// `row_to_json` so callers receive rows as JSON objects.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }

    async fn fetch_rows(&self, table: &'static str, sql: &str, params: Vec<&SqlValue>) -> Result<Vec<Row>, DatabaseError> {
        let mut q = sqlx::query(sql);
        for p in params {
            q = bind_value(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|row| {
                let value: Value = row.try_get("row")?;
                match value {
                    Value::Object(map) => Ok(map),
                    other => Err(DatabaseError::RowShape {
                        table,
                        message: format!("expected object, got {}", other),
                    }),
                }
            })
            .collect()
    }

    async fn fetch_optional_row(
        &self,
        table: &'static str,
        sql: &str,
        params: Vec<&SqlValue>,
    ) -> Result<Option<Row>, DatabaseError> {
        Ok(self.fetch_rows(table, sql, params).await?.into_iter().next())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn select(&self, table: &'static str, filter: &Filter) -> Result<Vec<Row>, DatabaseError> {
        let (sql, params) = select_sql(table, filter);
        self.fetch_rows(table, &sql, params).await
    }

    async fn insert(&self, table: &'static str, columns: &[Column]) -> Result<Row, DatabaseError> {
        let sql = insert_sql(table, columns);
        let params = columns.iter().map(|c| &c.value).collect();
        self.fetch_optional_row(table, &sql, params)
            .await?
            .ok_or_else(|| DatabaseError::RowShape {
                table,
                message: "insert returned no row".to_string(),
            })
    }

    async fn update(&self, table: &'static str, id: i64, columns: &[Column]) -> Result<Option<Row>, DatabaseError> {
        let sql = update_sql(table, columns);
        let id_value = SqlValue::BigInt(Some(id));
        let mut params: Vec<&SqlValue> = columns.iter().map(|c| &c.value).collect();
        params.push(&id_value);
        self.fetch_optional_row(table, &sql, params).await
    }

    async fn delete(&self, table: &'static str, id: i64) -> Result<Option<Row>, DatabaseError> {
        let sql = delete_sql(table);
        let id_value = SqlValue::BigInt(Some(id));
        self.fetch_optional_row(table, &sql, vec![&id_value]).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn select_sql<'f>(table: &str, filter: &'f Filter) -> (String, Vec<&'f SqlValue>) {
    let (where_clause, params) = filter.to_sql(1);
    let sql = format!(
        "SELECT row_to_json(t) AS row FROM (SELECT * FROM {}{} ORDER BY \"id\") t",
        quote_identifier(table),
        where_clause
    );
    (sql, params)
}

fn insert_sql(table: &str, columns: &[Column]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_identifier(c.name)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "WITH t AS (INSERT INTO {} ({}) VALUES ({}) RETURNING *) SELECT row_to_json(t) AS row FROM t",
        quote_identifier(table),
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Columns take `$1..$n`; the id is always the last placeholder
fn update_sql(table: &str, columns: &[Column]) -> String {
    let assignments: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", quote_identifier(c.name), i + 1))
        .collect();
    format!(
        "WITH t AS (UPDATE {} SET {} WHERE \"id\" = ${} RETURNING *) SELECT row_to_json(t) AS row FROM t",
        quote_identifier(table),
        assignments.join(", "),
        columns.len() + 1
    )
}

fn delete_sql(table: &str) -> String {
    format!(
        "WITH t AS (DELETE FROM {} WHERE \"id\" = $1 RETURNING *) SELECT row_to_json(t) AS row FROM t",
        quote_identifier(table)
    )
}

fn bind_value<'q>(q: PgQuery<'q>, v: &'q SqlValue) -> PgQuery<'q> {
    match v {
        SqlValue::BigInt(i) => q.bind(*i),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.as_deref()),
        SqlValue::TextArray(items) => q.bind(items.clone()),
        SqlValue::Json(value) => q.bind(sqlx::types::Json(value.clone())), // JSONB
    }
}
