//! Dynamic row record

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Trait for items that can be displayed as rows in a [`Table`](crate::table::Table).
///
/// The table never mutates a row. It only reads cells by column key, so any
/// type that can hand out borrowed [`Value`]s can be used directly.
///
/// # Example
///
/// ```
/// use tablekit_lib::model::{TableRow, Value};
///
/// struct User {
///     id: Value,
///     name: Value,
/// }
///
/// impl TableRow for User {
///     fn cell(&self, key: &str) -> Option<&Value> {
///         match key {
///             "id" => Some(&self.id),
///             "name" => Some(&self.name),
///             _ => None,
///         }
///     }
///
///     fn cells(&self) -> impl Iterator<Item = (&str, &Value)> {
///         [("id", &self.id), ("name", &self.name)].into_iter()
///     }
/// }
/// ```
pub trait TableRow {
    /// Returns the cell stored under `key`, if the row has one.
    fn cell(&self, key: &str) -> Option<&Value>;

    /// Iterates every cell of the row in its natural order.
    fn cells(&self) -> impl Iterator<Item = (&str, &Value)>;
}

/// An ordered mapping from column key to cell value.
///
/// Records deserialize straight from JSON objects, keeping the key order of
/// the source document.
///
/// # Example
///
/// ```
/// use tablekit_lib::model::{Record, TableRow, Value};
///
/// let record = Record::new()
///     .set("id", 1)
///     .set("name", "Contoso");
///
/// assert_eq!(record.cell("name"), Some(&Value::from("Contoso")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TableRow for Record {
    fn cell(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn cells(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
