//! Table UI State
//!
//! Search query, current page, sort key/direction and column visibility of a
//! single table instance.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Sort direction of the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// UI state owned by one DataTable
#[derive(Debug, Clone)]
pub struct TableState {
    search_query: String,
    current_page: usize,
    sort_key: Option<String>,
    sort_direction: SortDirection,
    visible_columns: LinkedHashMap<String, bool>,
}

impl TableState {
    /// Create state for the given column keys, all visible
    pub fn new<'a>(column_keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
            sort_key: None,
            sort_direction: SortDirection::Asc,
            visible_columns: column_keys
                .into_iter()
                .map(|key| (key.to_string(), true))
                .collect(),
        }
    }

    // ==================== Getters ====================

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Columns without an entry are visible
    pub fn is_column_visible(&self, key: &str) -> bool {
        self.visible_columns.get(key).copied().unwrap_or(true)
    }

    /// Keys that currently have a visibility entry, in column order
    pub fn tracked_columns(&self) -> impl Iterator<Item = &str> {
        self.visible_columns.keys().map(String::as_str)
    }

    // ==================== Transitions ====================

    /// Replace the query and go back to the first page
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.current_page = 1;
    }

    /// Flip the direction of the active key, or start ascending on a new key
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = SortDirection::Asc;
    }

    /// Move to `page`, clamped into `[1, total_pages]`
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn set_column_visible(&mut self, key: &str, visible: bool) {
        if let Some(entry) = self.visible_columns.get_mut(key) {
            *entry = visible;
        }
    }

    /// Reconcile visibility with a new column set
    ///
    /// Keys no longer present are dropped, new keys start visible and existing
    /// keys keep their flag. Returns true when the key set changed, in which
    /// case the page is reset to 1.
    pub fn reconcile_columns<'a>(
        &mut self,
        column_keys: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        let keys: Vec<&str> = column_keys.into_iter().collect();
        let unchanged = keys.len() == self.visible_columns.len()
            && keys
                .iter()
                .zip(self.visible_columns.keys())
                .all(|(new, old)| *new == old.as_str());
        if unchanged {
            return false;
        }

        let mut next = LinkedHashMap::with_capacity(keys.len());
        for key in keys {
            let visible = self.visible_columns.get(key).copied().unwrap_or(true);
            next.insert(key.to_string(), visible);
        }
        self.visible_columns = next;

        if let Some(sort_key) = self.sort_key.as_deref() {
            if !self.visible_columns.contains_key(sort_key) {
                self.clear_sort();
            }
        }

        self.current_page = 1;
        true
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}
