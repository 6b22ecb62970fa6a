use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::filter::Filter;
use super::manager::DatabaseError;
use super::store::{Column, Row, Store};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

/// In-process store with the same per-statement contracts as `PgStore`.
/// Ids are assigned from 1 per table; unique constraints are not enforced.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(row: &Row, filter: &Filter) -> bool {
        filter
            .clauses()
            .iter()
            .all(|(field, value)| row.get(*field).unwrap_or(&Value::Null) == &value.to_json())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, table: &'static str, filter: &Filter) -> Result<Vec<Row>, DatabaseError> {
        let tables = self.tables.read().await;
        let rows = tables
            .get(table)
            .map(|t| {
                t.rows
                    .values()
                    .filter(|row| Self::matches(row, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(rows)
    }

    async fn insert(&self, table: &'static str, columns: &[Column]) -> Result<Row, DatabaseError> {
        let mut tables = self.tables.write().await;
        let t = tables.entry(table).or_default();
        t.next_id += 1;
        let id = t.next_id;

        let mut row = Row::new();
        row.insert("id".to_string(), Value::from(id));
        for column in columns {
            row.insert(column.name.to_string(), column.value.to_json());
        }
        t.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, table: &'static str, id: i64, columns: &[Column]) -> Result<Option<Row>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.get_mut(table).and_then(|t| t.rows.get_mut(&id)) else {
            return Ok(None);
        };
        for column in columns {
            row.insert(column.name.to_string(), column.value.to_json());
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, table: &'static str, id: i64) -> Result<Option<Row>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.get_mut(table).and_then(|t| t.rows.remove(&id)))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
