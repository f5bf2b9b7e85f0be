//! Injectable filter predicates.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::Value;

/// Strategy deciding whether a cell passes a column filter.
///
/// Implemented for any `Fn(&str, &Value) -> bool` closure, so most callers
/// never name the trait.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tablekit_lib::filter::{ColumnFilter, FilterPredicate};
/// use tablekit_lib::model::Value;
///
/// let exact = |text: &str, cell: &Value| cell.text() == text;
/// assert!(exact.matches("7", &Value::from(7)));
///
/// let filter = ColumnFilter::predicate("7", Arc::new(exact));
/// # let _ = filter;
/// ```
pub trait FilterPredicate: Send + Sync {
    /// Returns `true` when `cell` satisfies the filter text.
    fn matches(&self, filter_text: &str, cell: &Value) -> bool;
}

impl<F> FilterPredicate for F
where
    F: Fn(&str, &Value) -> bool + Send + Sync,
{
    fn matches(&self, filter_text: &str, cell: &Value) -> bool {
        self(filter_text, cell)
    }
}

/// Named predicates that configuration can refer to.
///
/// A fresh registry contains the built-ins:
///
/// | Name | Passes when |
/// |------|-------------|
/// | `equals` | cell text equals the filter text, ignoring case |
/// | `starts_with` | cell text starts with the filter text, ignoring case |
/// | `ends_with` | cell text ends with the filter text, ignoring case |
/// | `greater_than` | cell is a number greater than the parsed filter text |
/// | `less_than` | cell is a number less than the parsed filter text |
#[derive(Clone)]
pub struct PredicateRegistry {
    predicates: HashMap<String, Arc<dyn FilterPredicate>>,
}

impl PredicateRegistry {
    /// Creates a registry holding the built-in predicates.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("equals", |text: &str, cell: &Value| {
            cell.text().to_lowercase() == text.to_lowercase()
        });
        registry.register("starts_with", |text: &str, cell: &Value| {
            cell.text().to_lowercase().starts_with(&text.to_lowercase())
        });
        registry.register("ends_with", |text: &str, cell: &Value| {
            cell.text().to_lowercase().ends_with(&text.to_lowercase())
        });
        registry.register("greater_than", |text: &str, cell: &Value| {
            numeric_pair(text, cell).is_some_and(|(bound, v)| v > bound)
        });
        registry.register("less_than", |text: &str, cell: &Value| {
            numeric_pair(text, cell).is_some_and(|(bound, v)| v < bound)
        });
        registry
    }

    /// Creates a registry with no predicates.
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Registers (or replaces) a predicate under `name`.
    pub fn register(&mut self, name: impl Into<String>, predicate: impl FilterPredicate + 'static) {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    /// Looks up a predicate by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn FilterPredicate>> {
        self.predicates.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn numeric_pair(text: &str, cell: &Value) -> Option<(f64, f64)> {
    let bound = text.trim().parse::<f64>().ok()?;
    Some((bound, cell.as_f64()?))
}
