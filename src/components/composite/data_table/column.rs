//! Column Definition
//!
//! Defines table columns with their properties, cell renderers and sort keys.

use std::sync::Arc;

use super::row::{CellValue, TableRow};

/// Transform from a row to its displayed cell text
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Transform from a row to the value it is sorted by
pub type SortValue<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Column definition for the DataTable
pub struct Column<R> {
    /// Column identifier, unique within a column set
    pub key: String,
    /// Column header label
    pub label: String,
    /// Whether clicking the header sorts by this column
    pub sortable: bool,
    render: Option<CellRenderer<R>>,
    sort_value: Option<SortValue<R>>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            sort_value: self.sort_value.clone(),
        }
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("render", &self.render.is_some())
            .field("sort_value", &self.sort_value.is_some())
            .finish()
    }
}

impl<R: TableRow> Column<R> {
    /// Create a new sortable column that renders the raw field value
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            render: None,
            sort_value: None,
        }
    }

    /// Exclude the column from sorting
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set a custom cell renderer
    pub fn render(mut self, render: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Set a custom sort key
    ///
    /// Comparison is on the string form, so numeric or date keys must be
    /// order-preserving strings (zero padded, ISO-8601, ...).
    pub fn sort_value(
        mut self,
        sort_value: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        self.sort_value = Some(Arc::new(sort_value));
        self
    }

    /// Render a cell
    pub fn render_cell(&self, row: &R) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.field(&self.key).display(),
        }
    }

    /// String the row is compared by when this column is the sort key
    pub fn sort_key(&self, row: &R) -> String {
        match &self.sort_value {
            Some(sort_value) => sort_value(row).display(),
            None => row.field(&self.key).display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn defaults_to_raw_field() {
        let column: Column<Value> = Column::new("title", "Title");
        let row = json!({"title": "Chair"});
        assert!(column.sortable);
        assert_eq!(column.render_cell(&row), "Chair");
        assert_eq!(column.sort_key(&row), "Chair");
    }

    #[test]
    fn custom_render_and_sort_value() {
        let column: Column<Value> = Column::new("type", "Type")
            .render(|row: &Value| {
                row.pointer("/request_types/name")
                    .and_then(Value::as_str)
                    .unwrap_or("Request")
                    .to_string()
            })
            .sort_value(|row: &Value| CellValue::from(row.pointer("/request_types/name").cloned()));
        let row = json!({"request_types": {"name": "Travel"}});
        let bare = json!({});

        assert_eq!(column.render_cell(&row), "Travel");
        assert_eq!(column.render_cell(&bare), "Request");
        assert_eq!(column.sort_key(&row), "Travel");
        assert_eq!(column.sort_key(&bare), "");
    }
}
