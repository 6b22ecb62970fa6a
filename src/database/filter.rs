use std::collections::HashMap;

use thiserror::Error;

use super::store::SqlValue;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Invalid value for filter '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// How a whitelisted query parameter is typed before binding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    Integer,
    Text,
}

/// A query parameter a resource kind allows filtering on
#[derive(Debug, Clone, Copy)]
pub struct FilterField {
    pub name: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn integer(name: &'static str) -> Self {
        Self { name, kind: FilterKind::Integer }
    }

    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: FilterKind::Text }
    }

    fn parse(&self, raw: &str) -> Result<SqlValue, FilterError> {
        match self.kind {
            FilterKind::Text => Ok(SqlValue::text(raw)),
            FilterKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(|v| SqlValue::BigInt(Some(v)))
                .map_err(|_| FilterError::InvalidValue {
                    field: self.name,
                    value: raw.to_string(),
                }),
        }
    }
}

/// Conjunction of equality predicates, rendered with positional parameters.
///
/// Clauses keep insertion order and are numbered from the starting index on
/// render, so any subset of optional filters yields contiguous `$n`
/// placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(&'static str, SqlValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &'static str, value: SqlValue) -> Self {
        self.push(field, value);
        self
    }

    pub fn push(&mut self, field: &'static str, value: SqlValue) {
        self.clauses.push((field, value));
    }

    /// Build from request query parameters, keeping only whitelisted fields.
    /// Absent and empty parameters are skipped.
    pub fn from_query(fields: &[FilterField], query: &HashMap<String, String>) -> Result<Self, FilterError> {
        let mut filter = Filter::new();
        for field in fields {
            match query.get(field.name) {
                Some(raw) if !raw.is_empty() => filter.push(field.name, field.parse(raw)?),
                _ => {}
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[(&'static str, SqlValue)] {
        &self.clauses
    }

    /// Render ` WHERE "a" = $n AND "b" = $n+1`, or an empty string when there
    /// are no clauses. Returns the bound values in placeholder order.
    pub fn to_sql(&self, starting_param_index: usize) -> (String, Vec<&SqlValue>) {
        if self.clauses.is_empty() {
            return (String::new(), vec![]);
        }

        let conditions: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(offset, (field, _))| {
                format!("{} = ${}", quote_identifier(field), starting_param_index + offset)
            })
            .collect();

        let params = self.clauses.iter().map(|(_, value)| value).collect();
        (format!(" WHERE {}", conditions.join(" AND ")), params)
    }
}

/// Quote SQL identifier to prevent injection
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
