//! Tri-state, multi-column sorting.
//!
//! Each column cycles `None → Ascending → Descending → None` on toggle.
//! Active columns are remembered in activation order and applied as a chain
//! of stable sorts, so the most recently activated column ends up as the
//! primary key and earlier ones break its ties.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::model::{TableRow, Value};

/// Sort direction of a single column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Not sorted.
    #[default]
    None,
    /// Ascending order (A-Z, 0-9, false before true).
    Ascending,
    /// Descending order (Z-A, 9-0, true before false).
    Descending,
}

impl SortDirection {
    /// The direction a header click moves to.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }

    /// Returns `true` unless the direction is `None`.
    pub fn is_active(self) -> bool {
        self != SortDirection::None
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Descending => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// Two values in one column that have no natural ordering.
///
/// The sort still completes using a fallback order (by value kind, then by
/// text), but the result for such a column is best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortWarning {
    /// Column the incomparable values were found in.
    pub column: String,
    /// Type name of the left-hand value.
    pub left: &'static str,
    /// Type name of the right-hand value.
    pub right: &'static str,
}

impl fmt::Display for SortWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "column '{}' mixes incomparable values ({} vs {})",
            self.column, self.left, self.right
        )
    }
}

/// Per-column sort directions plus the order columns were activated in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    /// Only active directions are stored.
    directions: HashMap<String, SortDirection>,
    /// Active keys, most recently activated last.
    order: Vec<String>,
}

impl SortState {
    /// Creates a state with no active columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current direction of `key`.
    pub fn direction(&self, key: &str) -> SortDirection {
        self.directions.get(key).copied().unwrap_or_default()
    }

    /// Active keys in activation order (the last one is the primary key).
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns `true` if any column is sorted.
    pub fn is_active(&self) -> bool {
        !self.order.is_empty()
    }

    /// Advances `key` to its next direction and returns it.
    ///
    /// Entering `Ascending` moves the key to the end of the activation
    /// order. `Descending` keeps its position. Returning to `None` removes
    /// it.
    pub fn toggle(&mut self, key: &str) -> SortDirection {
        let next = self.direction(key).next();
        match next {
            SortDirection::Ascending => {
                self.order.retain(|k| k != key);
                self.order.push(key.to_string());
                self.directions.insert(key.to_string(), next);
            }
            SortDirection::Descending => {
                self.directions.insert(key.to_string(), next);
            }
            SortDirection::None => {
                self.order.retain(|k| k != key);
                self.directions.remove(key);
            }
        }
        next
    }

    /// Resets every column to `None`.
    pub fn clear(&mut self) {
        self.directions.clear();
        self.order.clear();
    }

    /// Sorts an index view over `rows` in place.
    ///
    /// Applies one stable sort per active key in activation order. Missing
    /// cells sort as `Null`. Returns one warning per column that contained
    /// incomparable values.
    pub fn apply<R: TableRow>(&self, rows: &[R], indices: &mut [usize]) -> Vec<SortWarning> {
        let mut warnings = Vec::new();
        for key in &self.order {
            let direction = self.direction(key);
            let mut incomparable: Option<(&'static str, &'static str)> = None;

            indices.sort_by(|&a, &b| {
                let left = cell_or_null(rows, a, key);
                let right = cell_or_null(rows, b, key);
                let ordering = match left.compare(right) {
                    Some(ordering) => ordering,
                    None => {
                        if incomparable.is_none() {
                            incomparable = Some((left.type_name(), right.type_name()));
                        }
                        fallback_compare(left, right)
                    }
                };
                direction.apply(ordering)
            });
            log::trace!("Sort pass on '{}' ({:?}) over {} rows", key, direction, indices.len());

            if let Some((left, right)) = incomparable {
                let warning = SortWarning {
                    column: key.clone(),
                    left,
                    right,
                };
                log::warn!("Sort: {}", warning);
                warnings.push(warning);
            }
        }
        warnings
    }
}

static NULL: Value = Value::Null;

fn cell_or_null<'a, R: TableRow>(rows: &'a [R], index: usize, key: &str) -> &'a Value {
    rows.get(index).and_then(|row| row.cell(key)).unwrap_or(&NULL)
}

/// Total order used when two values have no natural ordering.
///
/// Values are grouped by kind first. Within a kind, NaN-bearing numbers use
/// IEEE total ordering and everything else falls back to its text.
fn fallback_compare(left: &Value, right: &Value) -> Ordering {
    kind_rank(left)
        .cmp(&kind_rank(right))
        .then_with(|| match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => left.text().cmp(&right.text()),
        })
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::String(_) => 3,
        Value::Json(_) => 4,
    }
}
