//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::error::TableError;
use crate::page::DEFAULT_SUMMARY_TEMPLATE;

/// Configuration for a [`Table`](crate::table::Table).
///
/// Built in code with the `with_*` setters or loaded from JSON.
///
/// # Example
///
/// ```
/// use tablekit_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_identity_key("id");
///
/// let loaded = TableConfig::from_json(r#"{
///     "columns": [{ "key": "id", "hidden": true }, { "key": "name" }],
///     "pageSize": 25,
///     "identityKey": "id"
/// }"#).unwrap();
///
/// assert_eq!(loaded.page_size, config.page_size);
/// assert_eq!(loaded.columns.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableConfig {
    /// Column descriptors in presentation order.
    pub columns: Vec<Column>,

    /// Rows per page. `None` or `0` shows every row on one page.
    ///
    /// Default: `None`
    pub page_size: Option<usize>,

    /// Column whose value uniquely identifies a row. Required for row
    /// expansion.
    ///
    /// Default: `None`
    pub identity_key: Option<String>,

    /// Pagination summary label, see [`PageWindow::label`](crate::page::PageWindow::label).
    ///
    /// Default: `"{min} - {max} of {total}"`
    pub summary_template: String,

    /// Initial filters, in the format accepted by
    /// [`FilterSpec::from_json`](crate::filter::FilterSpec::from_json).
    ///
    /// Default: `None`
    pub filters: Option<serde_json::Value>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            page_size: None,
            identity_key: None,
            summary_template: DEFAULT_SUMMARY_TEMPLATE.to_string(),
            filters: None,
        }
    }
}

impl TableConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the columns.
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the identity key used for row expansion.
    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    /// Sets the pagination summary template.
    pub fn with_summary_template(mut self, template: impl Into<String>) -> Self {
        self.summary_template = template.into();
        self
    }

    /// Sets the initial filters.
    pub fn with_filters(mut self, filters: serde_json::Value) -> Self {
        self.filters = Some(filters);
        self
    }
}
