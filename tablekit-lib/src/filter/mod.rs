//! Row filtering.
//!
//! A [`FilterSpec`] maps column keys to filters. Plain text filters keep
//! rows whose cell contains the text (ignoring case); predicate filters hand
//! the filter text and the cell to a [`FilterPredicate`]. The reserved
//! [`GLOBAL_KEY`] matches its text against every cell of the row.
//!
//! # Example
//!
//! ```
//! use tablekit_lib::filter::{filter, FilterSpec};
//! use tablekit_lib::model::Record;
//!
//! let rows = vec![
//!     Record::new().set("id", 1).set("h1", "b"),
//!     Record::new().set("id", 2).set("h1", "a"),
//!     Record::new().set("id", 3).set("h1", "A"),
//! ];
//!
//! let spec = FilterSpec::new().text("h1", "a");
//! assert_eq!(filter(&rows, &spec), vec![1, 2]);
//! ```

mod predicate;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::TableError;
use crate::model::{TableRow, Value};

pub use predicate::{FilterPredicate, PredicateRegistry};

/// Filter key matched against every cell of a row.
pub const GLOBAL_KEY: &str = "global";

/// A single filter entry.
#[derive(Clone)]
pub enum ColumnFilter {
    /// Case-insensitive substring match on the cell's text.
    Text(String),
    /// Custom predicate applied to the cell.
    Predicate {
        /// Filter text handed to the predicate.
        value: String,
        /// The strategy deciding a match.
        predicate: Arc<dyn FilterPredicate>,
    },
}

impl ColumnFilter {
    /// Creates a substring filter.
    pub fn text(value: impl Into<String>) -> Self {
        ColumnFilter::Text(value.into())
    }

    /// Creates a predicate filter.
    pub fn predicate(value: impl Into<String>, predicate: Arc<dyn FilterPredicate>) -> Self {
        ColumnFilter::Predicate {
            value: value.into(),
            predicate,
        }
    }

    /// The filter text.
    pub fn value(&self) -> &str {
        match self {
            ColumnFilter::Text(v) => v,
            ColumnFilter::Predicate { value, .. } => value,
        }
    }

    /// Empty filters never exclude anything.
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

impl fmt::Debug for ColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnFilter::Text(v) => f.debug_tuple("Text").field(v).finish(),
            ColumnFilter::Predicate { value, .. } => f
                .debug_struct("Predicate")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

/// Mapping from column key (or [`GLOBAL_KEY`]) to a filter.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    entries: IndexMap<String, ColumnFilter>,
}

impl FilterSpec {
    /// Creates an empty spec, which keeps every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a substring filter (builder pattern).
    pub fn text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), ColumnFilter::text(value));
        self
    }

    /// Adds a global substring filter (builder pattern).
    pub fn global(self, value: impl Into<String>) -> Self {
        self.text(GLOBAL_KEY, value)
    }

    /// Adds an arbitrary filter entry (builder pattern).
    pub fn with(mut self, key: impl Into<String>, filter: ColumnFilter) -> Self {
        self.entries.insert(key.into(), filter);
        self
    }

    /// Inserts or replaces a filter entry.
    pub fn insert(&mut self, key: impl Into<String>, filter: ColumnFilter) {
        self.entries.insert(key.into(), filter);
    }

    /// Updates the filter text for `key`.
    ///
    /// A predicate entry keeps its predicate and only takes the new text;
    /// any other key becomes a substring filter.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.get_mut(key) {
            Some(ColumnFilter::Predicate { value: current, .. }) => *current = value,
            Some(ColumnFilter::Text(current)) => *current = value,
            None => {
                self.entries.insert(key.to_string(), ColumnFilter::Text(value));
            }
        }
    }

    /// Removes the filter for `key`.
    pub fn remove(&mut self, key: &str) -> Option<ColumnFilter> {
        self.entries.shift_remove(key)
    }

    /// Returns the filter for `key`.
    pub fn get(&self, key: &str) -> Option<&ColumnFilter> {
        self.entries.get(key)
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnFilter)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Returns `true` if the spec has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Builds a spec from JSON configuration.
    ///
    /// The JSON must be an object. Each entry is either a string (substring
    /// filter) or an object `{"value": "...", "predicate": "<name>"}` whose
    /// predicate is looked up in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MalformedFilter`] when a predicate pair lacks
    /// its value or predicate, names an unregistered predicate, or when an
    /// entry is neither a string nor an object.
    pub fn from_json(
        json: &serde_json::Value,
        registry: &PredicateRegistry,
    ) -> Result<Self, TableError> {
        let Some(object) = json.as_object() else {
            return Err(TableError::malformed_filter(
                "<root>",
                "filter spec must be a JSON object",
            ));
        };

        let mut spec = Self::new();
        for (key, entry) in object {
            let filter = match entry {
                serde_json::Value::String(text) => ColumnFilter::text(text.as_str()),
                serde_json::Value::Object(pair) => {
                    let value = pair
                        .get("value")
                        .and_then(serde_json::Value::as_str)
                        .ok_or_else(|| {
                            TableError::malformed_filter(key, "predicate filter needs a string 'value'")
                        })?;
                    let name = pair
                        .get("predicate")
                        .and_then(serde_json::Value::as_str)
                        .ok_or_else(|| {
                            TableError::malformed_filter(key, "predicate filter needs a 'predicate' name")
                        })?;
                    let predicate = registry.get(name).ok_or_else(|| {
                        TableError::malformed_filter(key, format!("unknown predicate '{name}'"))
                    })?;
                    ColumnFilter::predicate(value, predicate)
                }
                other => {
                    return Err(TableError::malformed_filter(
                        key,
                        format!("expected string or object, got {other}"),
                    ));
                }
            };
            spec.insert(key.clone(), filter);
        }
        Ok(spec)
    }
}

/// Filters `rows`, returning the indices of retained rows in input order.
///
/// An empty spec keeps every row.
pub fn filter<R: TableRow>(rows: &[R], spec: &FilterSpec) -> Vec<usize> {
    let all: Vec<usize> = (0..rows.len()).collect();
    filter_indices(rows, &all, spec)
}

/// Filters an existing index view over `rows`, keeping its order.
///
/// Indices that do not point at a row are dropped.
pub fn filter_indices<R: TableRow>(rows: &[R], indices: &[usize], spec: &FilterSpec) -> Vec<usize> {
    if spec.is_empty() {
        return indices.to_vec();
    }

    let matcher = Matcher::new(spec);
    indices
        .iter()
        .copied()
        .filter(|&i| rows.get(i).is_some_and(|row| matcher.retains(row)))
        .collect()
}

/// A spec with empty entries dropped and needles lowercased once.
struct Matcher<'a> {
    global: Option<String>,
    columns: Vec<(&'a str, Compiled<'a>)>,
}

enum Compiled<'a> {
    Text(String),
    Predicate(&'a str, &'a dyn FilterPredicate),
}

impl<'a> Matcher<'a> {
    fn new(spec: &'a FilterSpec) -> Self {
        let mut global = None;
        let mut columns = Vec::new();
        for (key, filter) in spec.iter() {
            if filter.is_empty() {
                continue;
            }
            if key == GLOBAL_KEY {
                global = Some(filter.value().to_lowercase());
                continue;
            }
            let compiled = match filter {
                ColumnFilter::Text(v) => Compiled::Text(v.to_lowercase()),
                ColumnFilter::Predicate { value, predicate } => {
                    Compiled::Predicate(value, &**predicate)
                }
            };
            columns.push((key, compiled));
        }
        Self { global, columns }
    }

    fn retains<R: TableRow>(&self, row: &R) -> bool {
        if let Some(needle) = &self.global
            && !row.cells().any(|(_, cell)| contains_lower(cell, needle))
        {
            return false;
        }

        self.columns.iter().all(|(key, compiled)| {
            let Some(cell) = row.cell(key) else {
                return true;
            };
            match compiled {
                Compiled::Text(needle) => contains_lower(cell, needle),
                Compiled::Predicate(value, predicate) => predicate.matches(value, cell),
            }
        })
    }
}

fn contains_lower(cell: &Value, needle: &str) -> bool {
    cell.text().to_lowercase().contains(needle)
}
