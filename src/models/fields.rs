use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid value for field: {0}")]
    Invalid(&'static str),
}

/// Request fields from a JSON object or multipart text parts.
///
/// A field counts as absent when it is missing, null, an empty string,
/// `false` or numeric zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; repeating a name collects the values into an array
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.0.insert(name, value);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !is_blank(v))
    }

    pub fn has(&self, key: &str) -> bool {
        self.present(key).is_some()
    }

    /// Fails with the first absent key
    pub fn require_all(&self, keys: &[&'static str]) -> Result<(), FieldError> {
        match keys.iter().find(|k| !self.has(k)) {
            Some(key) => Err(FieldError::Missing(*key)),
            None => Ok(()),
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.present(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn require_text(&self, key: &'static str) -> Result<String, FieldError> {
        self.text(key).ok_or(FieldError::Missing(key))
    }

    pub fn integer(&self, key: &'static str) -> Result<Option<i64>, FieldError> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.map(Some).ok_or(FieldError::Invalid(key))
    }

    pub fn require_integer(&self, key: &'static str) -> Result<i64, FieldError> {
        self.integer(key)?.ok_or(FieldError::Missing(key))
    }

    /// Array, JSON-encoded array string, repeated parts, or a single string.
    /// Absent yields an empty list.
    pub fn string_list(&self, key: &'static str) -> Result<Vec<String>, FieldError> {
        match self.present(key) {
            None => Ok(vec![]),
            Some(Value::Array(items)) => Ok(items.iter().map(value_to_string).collect()),
            Some(Value::String(s)) if s.trim_start().starts_with('[') => {
                match serde_json::from_str::<Value>(s) {
                    Ok(Value::Array(items)) => Ok(items.iter().map(value_to_string).collect()),
                    _ => Err(FieldError::Invalid(key)),
                }
            }
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(_) => Err(FieldError::Invalid(key)),
        }
    }

    /// Object or JSON-encoded object string. Absent yields `{}`.
    pub fn object(&self, key: &'static str) -> Result<Value, FieldError> {
        match self.present(key) {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(map)) => Ok(Value::Object(map.clone())),
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Ok(Value::Object(map)),
                _ => Err(FieldError::Invalid(key)),
            },
            Some(_) => Err(FieldError::Invalid(key)),
        }
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => Fields::from(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn blank_values_count_as_absent() {
        let f = fields(json!({ "a": "", "b": null, "c": 0, "d": false, "e": "0" }));
        assert!(!f.has("a"));
        assert!(!f.has("b"));
        assert!(!f.has("c"));
        assert!(!f.has("d"));
        assert!(f.has("e"));
        assert_eq!(f.require_all(&["e", "a"]), Err(FieldError::Missing("a")));
    }

    #[test]
    fn integers_accept_numbers_and_decimal_strings() {
        let f = fields(json!({ "n": 500000000, "s": " 42 ", "bad": "4x", "float": 3.0 }));
        assert_eq!(f.integer("n"), Ok(Some(500000000)));
        assert_eq!(f.integer("s"), Ok(Some(42)));
        assert_eq!(f.integer("float"), Ok(Some(3)));
        assert_eq!(f.integer("bad"), Err(FieldError::Invalid("bad")));
        assert_eq!(f.integer("missing"), Ok(None));
    }

    #[test]
    fn repeated_parts_collect_into_list() {
        let mut f = Fields::new();
        f.insert("features", json!("ABS"));
        f.insert("features", json!("Airbag"));
        f.insert("features", json!("Sunroof"));
        assert_eq!(f.string_list("features").unwrap(), vec!["ABS", "Airbag", "Sunroof"]);
    }

    #[test]
    fn list_forms() {
        let f = fields(json!({
            "encoded": "[\"ABS\",\"Airbag\"]",
            "single": "Cruise control",
            "broken": "[oops",
        }));
        assert_eq!(f.string_list("encoded").unwrap(), vec!["ABS", "Airbag"]);
        assert_eq!(f.string_list("single").unwrap(), vec!["Cruise control"]);
        assert_eq!(f.string_list("absent").unwrap(), Vec::<String>::new());
        assert_eq!(f.string_list("broken"), Err(FieldError::Invalid("broken")));
    }

    #[test]
    fn object_forms() {
        let f = fields(json!({
            "obj": { "engine": "1.5L" },
            "encoded": "{\"seats\":5}",
            "array": "[1]",
        }));
        assert_eq!(f.object("obj").unwrap(), json!({ "engine": "1.5L" }));
        assert_eq!(f.object("encoded").unwrap(), json!({ "seats": 5 }));
        assert_eq!(f.object("absent").unwrap(), json!({}));
        assert_eq!(f.object("array"), Err(FieldError::Invalid("array")));
    }
}
