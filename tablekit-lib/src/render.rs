//! Per-column cell renderers.
//!
//! The table core never calls a renderer itself. It only stores the mapping
//! so the presentation layer can resolve one per column, falling back to the
//! default when a column has no entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::Value;

/// Turns a cell into display text.
///
/// Implemented for any `Fn(&str, Option<&Value>) -> String` closure.
pub trait CellRenderer: Send + Sync {
    /// Renders the cell under column `key`. `value` is `None` when the row
    /// has no such cell.
    fn render(&self, key: &str, value: Option<&Value>) -> String;
}

impl<F> CellRenderer for F
where
    F: Fn(&str, Option<&Value>) -> String + Send + Sync,
{
    fn render(&self, key: &str, value: Option<&Value>) -> String {
        self(key, value)
    }
}

/// Default renderer: the cell's canonical text, empty for missing cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl CellRenderer for TextRenderer {
    fn render(&self, _key: &str, value: Option<&Value>) -> String {
        value.map(Value::text).unwrap_or_default()
    }
}

/// Column key to renderer mapping with a default.
#[derive(Clone)]
pub struct Renderers {
    by_column: HashMap<String, Arc<dyn CellRenderer>>,
    default: Arc<dyn CellRenderer>,
}

impl Renderers {
    /// Creates a registry that renders every column as text.
    pub fn new() -> Self {
        Self {
            by_column: HashMap::new(),
            default: Arc::new(TextRenderer),
        }
    }

    /// Registers a renderer for one column (builder pattern).
    pub fn with(mut self, key: impl Into<String>, renderer: impl CellRenderer + 'static) -> Self {
        self.insert(key, renderer);
        self
    }

    /// Registers (or replaces) a renderer for one column.
    pub fn insert(&mut self, key: impl Into<String>, renderer: impl CellRenderer + 'static) {
        self.by_column.insert(key.into(), Arc::new(renderer));
    }

    /// Replaces the fallback renderer.
    pub fn set_default(&mut self, renderer: impl CellRenderer + 'static) {
        self.default = Arc::new(renderer);
    }

    /// Returns `true` if `key` has its own renderer.
    pub fn has_custom(&self, key: &str) -> bool {
        self.by_column.contains_key(key)
    }

    /// The renderer for `key`, or the default.
    pub fn resolve(&self, key: &str) -> &dyn CellRenderer {
        self.by_column
            .get(key)
            .map_or(&*self.default, |r| &**r)
    }

    /// Renders one cell with the resolved renderer.
    pub fn render(&self, key: &str, value: Option<&Value>) -> String {
        self.resolve(key).render(key, value)
    }
}

impl Default for Renderers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Renderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.by_column.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Renderers")
            .field("custom", &keys)
            .finish_non_exhaustive()
    }
}
