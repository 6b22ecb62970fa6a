use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::filter::Filter;
use super::manager::DatabaseError;

/// A stored row as returned by the store, keyed by column name
pub type Row = Map<String, Value>;

/// A typed parameter value. NULLs carry their column type so Postgres can
/// bind them without an explicit cast.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Int(Option<i32>),
    Text(Option<String>),
    TextArray(Vec<String>),
    Json(Value),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(Some(value.into()))
    }

    /// JSON rendering as it appears in a returned row
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::BigInt(v) => v.map(Value::from).unwrap_or(Value::Null),
            SqlValue::Int(v) => v.map(Value::from).unwrap_or(Value::Null),
            SqlValue::Text(v) => v.clone().map(Value::String).unwrap_or(Value::Null),
            SqlValue::TextArray(v) => Value::Array(v.iter().cloned().map(Value::String).collect()),
            SqlValue::Json(v) => v.clone(),
        }
    }
}

/// A column assignment for insert/update statements
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: &'static str,
    pub value: SqlValue,
}

impl Column {
    pub fn new(name: &'static str, value: SqlValue) -> Self {
        Self { name, value }
    }
}

/// Row-level access to the backing store.
///
/// Every statement is independently atomic; nothing here spans a
/// transaction. Tables and column names are compile-time constants of the
/// resource kinds, never caller input.
#[async_trait]
pub trait Store: Send + Sync {
    async fn select(&self, table: &'static str, filter: &Filter) -> Result<Vec<Row>, DatabaseError>;

    async fn insert(&self, table: &'static str, columns: &[Column]) -> Result<Row, DatabaseError>;

    /// Returns `None` when no row has the given id
    async fn update(&self, table: &'static str, id: i64, columns: &[Column]) -> Result<Option<Row>, DatabaseError>;

    /// Returns the deleted row, or `None` when no row has the given id
    async fn delete(&self, table: &'static str, id: i64) -> Result<Option<Row>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// Deserialize a store row into a typed record
pub fn decode_row<T: DeserializeOwned>(table: &'static str, row: Row) -> Result<T, DatabaseError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| DatabaseError::RowShape {
        table,
        message: e.to_string(),
    })
}

pub fn decode_rows<T: DeserializeOwned>(table: &'static str, rows: Vec<Row>) -> Result<Vec<T>, DatabaseError> {
    rows.into_iter().map(|row| decode_row(table, row)).collect()
}
