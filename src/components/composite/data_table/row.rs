//! Row Abstraction
//!
//! The table never assumes a schema: a row only has to expose its fields by key
//! and enumerate all of its values for search.

use serde_json::{Map, Value};

/// A displayable field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Missing or null value, displays as an empty string
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Nested object or array, displayed as compact JSON
    Nested(Value),
}

impl CellValue {
    /// String form used for display, search and sort
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Nested(value) => value.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n
                .as_f64()
                .map(CellValue::Number)
                .unwrap_or_else(|| CellValue::Text(n.to_string())),
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Array(_) | Value::Object(_) => CellValue::Nested(value.clone()),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        CellValue::from(&value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// A row the DataTable can search, sort and render
pub trait TableRow {
    /// Value of a single field, `Null` when absent
    fn field(&self, key: &str) -> CellValue;

    /// Every field value of the row, in field order
    fn values(&self) -> Vec<CellValue>;
}

impl TableRow for Map<String, Value> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map(CellValue::from).unwrap_or_default()
    }

    fn values(&self) -> Vec<CellValue> {
        self.values().map(CellValue::from).collect()
    }
}

impl TableRow for Value {
    fn field(&self, key: &str) -> CellValue {
        match self {
            Value::Object(map) => map.field(key),
            _ => CellValue::Null,
        }
    }

    fn values(&self) -> Vec<CellValue> {
        match self {
            Value::Object(map) => TableRow::values(map),
            other => vec![CellValue::from(other)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_string_forms() {
        assert_eq!(CellValue::Null.display(), "");
        assert_eq!(CellValue::from(10_i64).display(), "10");
        assert_eq!(CellValue::from(1.5).display(), "1.5");
        assert_eq!(CellValue::from(true).display(), "true");
        assert_eq!(
            CellValue::from(json!({"name": "Travel"})).display(),
            r#"{"name":"Travel"}"#
        );
    }

    #[test]
    fn json_object_exposes_fields() {
        let row = json!({"title": "Laptop", "count": 2, "owner": null});
        assert_eq!(row.field("title"), CellValue::Text("Laptop".into()));
        assert_eq!(row.field("count").display(), "2");
        assert!(row.field("owner").is_null());
        assert!(row.field("missing").is_null());
        assert_eq!(TableRow::values(&row).len(), 3);
    }
}
