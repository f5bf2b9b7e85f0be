//! Table coordinator - owns the rows and all interaction state.
//!
//! The [`Table`] is the only place the displayed view changes. Every
//! mutation that can affect it (rows, columns, filters, sorting) re-runs the
//! whole pipeline synchronously: filter the source rows, then sort the
//! survivors. Pagination and expansion are read against the result.
//!
//! # Example
//!
//! ```
//! use tablekit_lib::column::Column;
//! use tablekit_lib::model::Record;
//! use tablekit_lib::page::PageButton;
//! use tablekit_lib::sort::SortDirection;
//! use tablekit_lib::table::Table;
//!
//! let mut table = Table::new(vec![Column::new("id"), Column::new("name")])
//!     .unwrap()
//!     .with_page_size(2);
//! table
//!     .set_rows(vec![
//!         Record::new().set("id", 1).set("name", "carol"),
//!         Record::new().set("id", 2).set("name", "alice"),
//!         Record::new().set("id", 3).set("name", "bob"),
//!     ])
//!     .unwrap();
//!
//! table.on_header_click("name");
//! assert_eq!(table.sort_direction("name"), SortDirection::Ascending);
//!
//! table.on_page_button(PageButton::Next);
//! assert_eq!(table.pagination_label(), "3 - 3 of 3");
//! ```

mod events;

use std::collections::{HashSet, VecDeque};

use crate::column::{Column, ColumnModel};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::expansion::{ExpansionTracker, RowId};
use crate::filter::{self, FilterSpec, PredicateRegistry};
use crate::model::TableRow;
use crate::page::{DEFAULT_SUMMARY_TEMPLATE, PageWindow, Pagination};
use crate::render::{CellRenderer, Renderers};
use crate::sort::{SortDirection, SortState, SortWarning};

pub use events::{EVENT_QUEUE_CAPACITY, TableEvent};

/// A filterable, sortable, paginated view over a set of rows.
///
/// `Table<R>` manages:
/// - Source rows (never mutated, only indexed)
/// - Column order and visibility
/// - Per-column and global filters
/// - Tri-state multi-column sorting
/// - Pagination
/// - Row expansion by identity
#[derive(Debug)]
pub struct Table<R: TableRow> {
    /// Source rows, in the order supplied.
    rows: Vec<R>,
    /// Column definitions.
    columns: ColumnModel,
    /// Active filters.
    filters: FilterSpec,
    /// Sort directions and activation order.
    sort: SortState,
    /// Page size and current page.
    pagination: Pagination,
    /// Expanded flag per row identity.
    expansion: ExpansionTracker,
    /// Column holding each row's unique identity.
    identity_key: Option<String>,
    /// Cell renderers handed to the presentation layer.
    renderers: Renderers,
    /// Pagination label template.
    summary_template: String,
    /// Indices into `rows` after filtering and sorting.
    displayed: Vec<usize>,
    /// Warnings from the last sort pass.
    sort_warnings: Vec<SortWarning>,
    /// Most recent events not yet drained, oldest first.
    events: VecDeque<TableEvent>,
}

impl<R: TableRow> Table<R> {
    /// Create an empty table with column definitions.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        Ok(Self {
            columns: ColumnModel::new(columns)?,
            ..Self::default()
        })
    }

    /// Create a table from configuration.
    ///
    /// Named predicates in the configured filters are resolved against
    /// `registry`.
    pub fn from_config(config: TableConfig, registry: &PredicateRegistry) -> Result<Self, TableError> {
        let filters = match &config.filters {
            Some(json) => FilterSpec::from_json(json, registry)?,
            None => FilterSpec::new(),
        };

        let mut table = Self::new(config.columns)?;
        table.pagination = Pagination::new(config.page_size);
        table.identity_key = config.identity_key;
        table.summary_template = config.summary_template;
        table.filters = filters;
        Ok(table)
    }

    /// Set the page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pagination.set_page_size(Some(page_size));
        self
    }

    /// Set the identity column used for row expansion (builder pattern).
    ///
    /// Call before supplying rows; [`set_identity_key`](Self::set_identity_key)
    /// validates rows that are already present.
    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    /// Set the cell renderers (builder pattern).
    pub fn with_renderers(mut self, renderers: Renderers) -> Self {
        self.renderers = renderers;
        self
    }

    /// Set the pagination label template (builder pattern).
    pub fn with_summary_template(mut self, template: impl Into<String>) -> Self {
        self.summary_template = template.into();
        self
    }

    /// Set the initial filters (builder pattern).
    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self.recompute();
        self
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Rebuild the displayed view: filter the source rows, then sort.
    fn recompute(&mut self) {
        let mut indices = filter::filter(&self.rows, &self.filters);
        let filtered = indices.len();
        self.sort_warnings = self.sort.apply(&self.rows, &mut indices);
        self.displayed = indices;
        log::debug!(
            "Table recomputed: {} rows, {} after filtering, sort order {:?}",
            self.rows.len(),
            filtered,
            self.sort.order()
        );
    }

    /// Re-apply the current sort order to the displayed view.
    ///
    /// The pipeline already does this after every change. This is only
    /// needed if a custom renderer or predicate depends on outside state.
    pub fn resort(&mut self) {
        self.sort_warnings = self.sort.apply(&self.rows, &mut self.displayed);
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Get the source rows in their original order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Replace all rows.
    ///
    /// Returns to page 1 and seeds every identity as collapsed. Expansion
    /// flags of identities that are still present are kept.
    ///
    /// # Errors
    ///
    /// With an identity key configured, rows sharing an identity are
    /// rejected and the table is left unchanged.
    pub fn set_rows(&mut self, rows: Vec<R>) -> Result<(), TableError> {
        let ids = self.identities(rows.iter())?;
        self.expansion.seed(ids);
        self.rows = rows;
        self.pagination.reset();
        self.recompute();
        Ok(())
    }

    /// Append rows.
    ///
    /// # Errors
    ///
    /// With an identity key configured, rejects rows whose identity
    /// collides with an existing row or another new row.
    pub fn push_rows(&mut self, rows: Vec<R>) -> Result<(), TableError> {
        let ids = self.identities(self.rows.iter().chain(rows.iter()))?;
        self.expansion.seed(ids);
        self.rows.extend(rows);
        self.pagination.reset();
        self.recompute();
        Ok(())
    }

    /// Remove all rows.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.pagination.reset();
        self.recompute();
    }

    /// Collect identities, failing on the first duplicate.
    fn identities<'a>(&self, rows: impl Iterator<Item = &'a R>) -> Result<Vec<RowId>, TableError>
    where
        R: 'a,
    {
        let Some(key) = &self.identity_key else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for row in rows {
            let Some(id) = identity_of(row, key) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                return Err(TableError::duplicate_identity(key, id.as_str()));
            }
            ids.push(id);
        }
        Ok(ids)
    }

    // -------------------------------------------------------------------------
    // Displayed data
    // -------------------------------------------------------------------------

    /// Indices into [`rows`](Self::rows) of the filtered, sorted view.
    pub fn displayed_indices(&self) -> &[usize] {
        &self.displayed
    }

    /// The filtered, sorted rows across all pages.
    pub fn displayed_rows(&self) -> Vec<&R> {
        self.displayed.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Number of rows in the filtered, sorted view.
    pub fn displayed_len(&self) -> usize {
        self.displayed.len()
    }

    /// The rows on the current page.
    pub fn displayed_page_rows(&self) -> Vec<&R> {
        let window = self.pagination_summary();
        self.displayed[window.range]
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Get the column model.
    pub fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    /// Column keys in presentation order, hidden ones included.
    pub fn column_order(&self) -> Vec<String> {
        self.columns.order()
    }

    /// Columns to render, in order.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns.visible().collect()
    }

    /// Replace the column definitions.
    ///
    /// Filter, sort, page and expansion state are kept; the view is
    /// recomputed.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<(), TableError> {
        self.columns = ColumnModel::new(columns)?;
        self.recompute();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Get the active filters.
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Replace all filters. Returns to page 1.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.pagination.reset();
        self.recompute();
    }

    /// Update the filter text for one key (or [`GLOBAL_KEY`](crate::filter::GLOBAL_KEY)).
    /// Returns to page 1.
    pub fn set_filter_value(&mut self, key: &str, value: impl Into<String>) {
        self.filters.set_value(key, value);
        self.pagination.reset();
        self.recompute();
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort direction of a column.
    pub fn sort_direction(&self, key: &str) -> SortDirection {
        self.sort.direction(key)
    }

    /// Sorted columns in activation order; the last one is the primary key.
    pub fn sort_order(&self) -> &[String] {
        self.sort.order()
    }

    /// Advance a column's sort direction and rebuild the view.
    ///
    /// Unlike [`on_header_click`](Self::on_header_click), this does not
    /// check that the column exists or is sortable.
    pub fn toggle_sort(&mut self, key: &str) -> SortDirection {
        let direction = self.sort.toggle(key);
        self.recompute();
        direction
    }

    /// Clear sort state and restore source order.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.recompute();
    }

    /// Warnings from the last sort pass.
    pub fn sort_warnings(&self) -> &[SortWarning] {
        &self.sort_warnings
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page and the slice it covers.
    pub fn pagination_summary(&self) -> PageWindow {
        self.pagination.window(self.displayed.len())
    }

    /// The pagination summary rendered with the configured template.
    pub fn pagination_label(&self) -> String {
        self.pagination_summary().label(&self.summary_template)
    }

    /// Returns `true` when rows are split into pages.
    pub fn is_paged(&self) -> bool {
        self.pagination.is_paged()
    }

    /// Change the page size. Returns to page 1.
    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.pagination.set_page_size(page_size);
    }

    /// Jump to a page, clamped into range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.pagination.go_to(page, self.displayed.len())
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    /// Get the identity column, if configured.
    pub fn identity_key(&self) -> Option<&str> {
        self.identity_key.as_deref()
    }

    /// Set the identity column, validating existing rows.
    pub fn set_identity_key(&mut self, key: impl Into<String>) -> Result<(), TableError> {
        let previous = self.identity_key.replace(key.into());
        match self.identities(self.rows.iter()) {
            Ok(ids) => {
                self.expansion = ExpansionTracker::new();
                self.expansion.seed(ids);
                Ok(())
            }
            Err(err) => {
                self.identity_key = previous;
                Err(err)
            }
        }
    }

    /// Identity of a row, or `None` if no identity key is configured or the
    /// row has no value for it. Rows without an identity cannot expand.
    pub fn row_id(&self, row: &R) -> Option<RowId> {
        identity_of(row, self.identity_key.as_deref()?)
    }

    /// Returns `true` if the row with this identity is expanded.
    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.identity_key.is_some() && self.expansion.is_expanded(id)
    }

    /// Returns `true` if this row is expanded.
    pub fn is_row_expanded(&self, row: &R) -> bool {
        self.row_id(row)
            .is_some_and(|id| self.expansion.is_expanded(&id))
    }

    /// Identities of expanded rows, sorted.
    pub fn expanded_rows(&self) -> Vec<RowId> {
        self.expansion.expanded()
    }

    /// Flip the expanded flag of one row.
    ///
    /// # Errors
    ///
    /// [`TableError::MissingIdentityKey`] without an identity key, and
    /// [`TableError::UnknownIdentity`] when no row has carried `id`.
    pub fn toggle_expanded(&mut self, id: &RowId) -> Result<bool, TableError> {
        if self.identity_key.is_none() {
            return Err(TableError::MissingIdentityKey);
        }
        self.expansion
            .toggle(id)
            .ok_or_else(|| TableError::unknown_identity(id.as_str()))
    }

    /// Collapse every row. Returns the identities that were expanded.
    pub fn collapse_all(&mut self) -> Vec<RowId> {
        self.expansion.collapse_all()
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Get the cell renderers.
    pub fn renderers(&self) -> &Renderers {
        &self.renderers
    }

    /// The renderer for a column, or the default one.
    pub fn renderer(&self, key: &str) -> &dyn CellRenderer {
        self.renderers.resolve(key)
    }

    /// Render one cell with the renderer registered for its column.
    pub fn render_cell(&self, row: &R, key: &str) -> String {
        self.renderers.render(key, row.cell(key))
    }
}

fn identity_of<R: TableRow>(row: &R, key: &str) -> Option<RowId> {
    row.cell(key)
        .filter(|value| !value.is_null())
        .map(RowId::from)
}

impl<R: TableRow> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: ColumnModel::default(),
            filters: FilterSpec::new(),
            sort: SortState::new(),
            pagination: Pagination::default(),
            expansion: ExpansionTracker::new(),
            identity_key: None,
            renderers: Renderers::new(),
            summary_template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
            displayed: Vec::new(),
            sort_warnings: Vec::new(),
            events: VecDeque::new(),
        }
    }
}

