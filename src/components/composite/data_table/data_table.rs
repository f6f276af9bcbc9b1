//! DataTable Component
//!
//! A searchable, sortable, paginated table over arbitrary rows. Every render is
//! derived in a fixed order: filter, sort, paginate, then project to the visible
//! columns. Filtering and sorting always see the full rows; only the final
//! projection honours column visibility.

use std::cmp::Ordering;

use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::column::Column;
use super::pagination::{self, Pagination};
use super::row::TableRow;
use super::state::{SortDirection, TableState};
use crate::constants::{DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_PLACEHOLDER};

/// Observer notified with every new search query
pub type SearchObserver = Box<dyn FnMut(&str) + Send>;

// ==================== Pure pipeline ====================

/// Indices of rows matching `query`, in input order
///
/// A row matches when the lower-cased string form of any of its values contains
/// the lower-cased query. An empty query matches everything.
pub fn filter_rows<R: TableRow>(rows: &[R], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.values()
                .iter()
                .any(|value| value.display().to_lowercase().contains(&needle))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Stable sort of `indices` by the column's sort key
pub fn sort_indices<R: TableRow>(
    rows: &[R],
    indices: &mut [usize],
    column: &Column<R>,
    direction: SortDirection,
) {
    let keys: Vec<String> = rows.iter().map(|row| column.sort_key(row)).collect();
    indices.sort_by(|&a, &b| {
        let ordering = locale_compare(&keys[a], &keys[b]);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Locale-style string ordering
///
/// Letters compare on their base form first, ignoring case and accents. Ties
/// break on accents (unaccented first), then on case (lower case first).
/// Digits compare as characters, so "10" < "9".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let primary = base_letters(a).cmp(base_letters(b));
    if primary != Ordering::Equal {
        return primary;
    }

    let accents = a
        .nfd()
        .flat_map(char::to_lowercase)
        .cmp(b.nfd().flat_map(char::to_lowercase));
    if accents != Ordering::Equal {
        return accents;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.cmp(b)
}

/// Lower-cased characters with combining marks stripped
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

// ==================== View model ====================

/// Sort indicator shown next to a sortable header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// A header cell of a visible column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    /// `None` for columns that are not sortable
    pub indicator: Option<SortIndicator>,
}

/// Entry of the "Toggle columns" menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnToggle {
    pub key: String,
    pub label: String,
    pub checked: bool,
}

/// Table body of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// No rows on this page; one cell spanning `colspan` columns
    Empty { message: String, colspan: usize },
    /// Rendered cells of the visible columns, row by row
    Rows(Vec<Vec<String>>),
}

/// Search input model, present when the table is searchable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBox {
    pub query: String,
    pub placeholder: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub search: Option<SearchBox>,
    pub column_menu: Vec<ColumnToggle>,
    pub headers: Vec<HeaderCell>,
    pub body: TableBody,
    /// Present only when there is more than one page
    pub pagination: Option<Pagination>,
}

impl TableView {
    /// Plain-text rendering, one line per row
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        if let Some(search) = &self.search {
            lines.push(format!("[search: {}]", search.query));
        }
        let header: Vec<String> = self
            .headers
            .iter()
            .map(|cell| match cell.indicator {
                Some(SortIndicator::Ascending) => format!("{} ^", cell.label),
                Some(SortIndicator::Descending) => format!("{} v", cell.label),
                _ => cell.label.clone(),
            })
            .collect();
        lines.push(header.join(" | "));
        match &self.body {
            TableBody::Empty { message, .. } => lines.push(message.clone()),
            TableBody::Rows(rows) => lines.extend(rows.iter().map(|cells| cells.join(" | "))),
        }
        if let Some(pagination) = &self.pagination {
            lines.push(pagination.label());
        }
        lines.join("\n")
    }
}

// ==================== Component ====================

/// DataTable component
pub struct DataTable<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    state: TableState,
    page_size: usize,
    searchable: bool,
    search_placeholder: String,
    empty_message: String,
    on_search: Option<SearchObserver>,
}

impl<R: TableRow> DataTable<R> {
    /// Create a new data table with the given columns and no rows
    pub fn new(columns: Vec<Column<R>>) -> Self {
        let columns = dedup_columns(columns);
        let state = TableState::new(columns.iter().map(|c| c.key.as_str()));
        Self {
            columns,
            rows: Vec::new(),
            state,
            page_size: DEFAULT_PAGE_SIZE,
            searchable: false,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            on_search: None,
        }
    }

    /// Set the rows (builder form)
    pub fn with_rows(mut self, rows: Vec<R>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Set the page size; 0 is treated as 1
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_page();
        self
    }

    /// Show the search input
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    /// Message rendered when the current page has no rows
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Register a search observer, for callers that filter remotely
    pub fn on_search(mut self, observer: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_search = Some(Box::new(observer));
        self
    }

    // ==================== Getters ====================

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    /// Row count after filtering
    pub fn total_items(&self) -> usize {
        filter_rows(&self.rows, self.state.search_query()).len()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.total_items(), self.page_size)
    }

    // ==================== Operations ====================

    /// Replace the column set, reconciling visibility and sort state
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = dedup_columns(columns);
        let changed = self
            .state
            .reconcile_columns(self.columns.iter().map(|c| c.key.as_str()));
        if changed {
            debug!(columns = self.columns.len(), "Table column set changed");
        }
    }

    /// Replace the rows; the current page is clamped to the new page count
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// Update the search query, reset to the first page and notify the observer
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.state.set_search(query.clone());
        if let Some(observer) = self.on_search.as_mut() {
            observer(&query);
        }
    }

    /// Sort by `key`, flipping direction when it is already active
    ///
    /// Unknown and non-sortable columns are ignored.
    pub fn toggle_sort(&mut self, key: &str) {
        let sortable = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .is_some_and(|c| c.sortable);
        if !sortable {
            return;
        }
        self.state.toggle_sort(key);
    }

    /// Jump to a 1-based page, clamped into range
    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.state.set_page(page, total);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.current_page() + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.state.current_page().saturating_sub(1));
    }

    /// Show or hide a column; filtering and sorting are unaffected
    pub fn set_column_visible(&mut self, key: &str, visible: bool) {
        self.state.set_column_visible(key, visible);
    }

    // ==================== Derivation ====================

    /// Filtered and sorted row indices
    pub fn sorted_indices(&self) -> Vec<usize> {
        let mut indices = filter_rows(&self.rows, self.state.search_query());
        let sort_column = self
            .state
            .sort_key()
            .and_then(|key| self.columns.iter().find(|c| c.key == key));
        if let Some(column) = sort_column {
            sort_indices(&self.rows, &mut indices, column, self.state.sort_direction());
        }
        indices
    }

    /// Rows of the current page, in display order
    pub fn page_rows(&self) -> Vec<&R> {
        let indices = self.sorted_indices();
        let range =
            pagination::page_range(self.state.current_page(), self.page_size, indices.len());
        indices[range].iter().map(|&i| &self.rows[i]).collect()
    }

    /// Visible columns in declaration order
    pub fn displayed_columns(&self) -> Vec<&Column<R>> {
        self.columns
            .iter()
            .filter(|c| self.state.is_column_visible(&c.key))
            .collect()
    }

    /// Build the render model for the current state
    pub fn view(&self) -> TableView {
        let indices = self.sorted_indices();
        let total_items = indices.len();
        let total_pages = pagination::total_pages(total_items, self.page_size);
        let current_page = self.state.current_page();
        let range = pagination::page_range(current_page, self.page_size, total_items);
        let displayed = self.displayed_columns();

        let headers = displayed
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                indicator: column.sortable.then(|| self.indicator_for(&column.key)),
            })
            .collect();

        let body = if range.is_empty() {
            TableBody::Empty {
                message: self.empty_message.clone(),
                colspan: displayed.len().max(1),
            }
        } else {
            TableBody::Rows(
                indices[range]
                    .iter()
                    .map(|&i| {
                        let row = &self.rows[i];
                        displayed.iter().map(|column| column.render_cell(row)).collect()
                    })
                    .collect(),
            )
        };

        let pagination = Pagination::new(current_page, total_pages, total_items);

        TableView {
            search: self.searchable.then(|| SearchBox {
                query: self.state.search_query().to_string(),
                placeholder: self.search_placeholder.clone(),
            }),
            column_menu: self
                .columns
                .iter()
                .map(|column| ColumnToggle {
                    key: column.key.clone(),
                    label: column.label.clone(),
                    checked: self.state.is_column_visible(&column.key),
                })
                .collect(),
            headers,
            body,
            pagination: pagination.is_visible().then_some(pagination),
        }
    }

    fn indicator_for(&self, key: &str) -> SortIndicator {
        match (self.state.sort_key(), self.state.sort_direction()) {
            (Some(active), SortDirection::Asc) if active == key => SortIndicator::Ascending,
            (Some(active), SortDirection::Desc) if active == key => SortIndicator::Descending,
            _ => SortIndicator::Unsorted,
        }
    }

    fn clamp_page(&mut self) {
        let total = self.total_pages();
        let page = self.state.current_page();
        self.state.set_page(page, total);
    }
}

/// Keep the first column for each key
fn dedup_columns<R>(columns: Vec<Column<R>>) -> Vec<Column<R>> {
    let mut seen = ahash::AHashSet::new();
    columns
        .into_iter()
        .filter(|column| {
            let fresh = seen.insert(column.key.clone());
            if !fresh {
                warn!(key = %column.key, "Dropping duplicate table column");
            }
            fresh
        })
        .collect()
}
