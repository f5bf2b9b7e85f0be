//! Column descriptors and the column model.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::TableError;

/// Column configuration.
///
/// The key is the column's identity for lookup, sorting, filtering and
/// reordering. The display name is presentation only.
///
/// # Examples
///
/// ```
/// use tablekit_lib::column::Column;
///
/// let columns = vec![
///     Column::new("id").hidden(),
///     Column::new("name").display_name("Full name"),
///     Column::new("notes").unsortable(),
/// ];
/// assert_eq!(columns[1].label(), "Full name");
/// assert_eq!(columns[2].label(), "notes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique, stable identity of the column.
    pub key: String,
    /// Header text shown instead of the key.
    #[serde(default, rename = "displayName", alias = "display_name")]
    pub display_name: Option<String>,
    /// Hidden columns keep their position but are not rendered.
    #[serde(default)]
    pub hidden: bool,
    /// Whether a header click toggles sorting on this column.
    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl Column {
    /// Create a new visible, sortable column.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: None,
            hidden: false,
            sortable: true,
        }
    }

    /// Set the header text.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Hide the column from rendering.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Ignore header clicks on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Header label: the display name, falling back to the key.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }
}

/// Ordered set of column descriptors with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    /// Build a model, rejecting duplicate keys.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !seen.insert(col.key.as_str()) {
                return Err(TableError::duplicate_column(&col.key));
            }
        }
        Ok(Self { columns })
    }

    /// All columns in presentation order, hidden ones included.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by key.
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns `true` if a column with this key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Column keys in presentation order, hidden ones included.
    pub fn order(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    /// Columns to render, in order.
    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.hidden)
    }

    /// Number of rendered columns (the slot width of a full-width row).
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Number of columns, hidden ones included.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Reorder columns to match `new_order`.
    ///
    /// The new order must name every current key exactly once. A key no
    /// column declares yields [`TableError::UnknownColumn`]; any other
    /// mismatch yields [`TableError::InvalidColumnOrder`]. On error the model
    /// is left unchanged.
    pub fn reorder<S: AsRef<str>>(&mut self, new_order: &[S]) -> Result<(), TableError> {
        if new_order.len() != self.columns.len() {
            return Err(TableError::invalid_order(format!(
                "expected {} keys, got {}",
                self.columns.len(),
                new_order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        let mut reordered = Vec::with_capacity(self.columns.len());
        for key in new_order {
            let key = key.as_ref();
            if !seen.insert(key) {
                return Err(TableError::invalid_order(format!("'{key}' listed twice")));
            }
            let Some(col) = self.get(key) else {
                return Err(TableError::unknown_column(key));
            };
            reordered.push(col.clone());
        }

        self.columns = reordered;
        Ok(())
    }
}
