//! Row expansion state.
//!
//! Expansion is tracked by row identity rather than position so it survives
//! filtering, sorting and paging. Identities are the canonical text of the
//! row's identity-key cell.

use std::collections::HashMap;
use std::fmt;

use crate::model::Value;

/// Identity of a row: the text of its identity-key cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(String);

impl RowId {
    /// Creates an identity from its text.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&Value> for RowId {
    fn from(value: &Value) -> Self {
        Self(value.text())
    }
}

/// Expanded flag per row identity.
///
/// Identities never seen default to collapsed. Flags for identities that
/// disappear from the data are kept; they are harmless and come back into
/// effect if the identity reappears.
#[derive(Debug, Clone, Default)]
pub struct ExpansionTracker {
    states: HashMap<RowId, bool>,
}

impl ExpansionTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collapsed flag for each identity not already tracked.
    pub fn seed<I: IntoIterator<Item = RowId>>(&mut self, ids: I) {
        for id in ids {
            self.states.entry(id).or_insert(false);
        }
    }

    /// Returns `true` if the row is expanded.
    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.states.get(id).copied().unwrap_or(false)
    }

    /// Returns `true` if the identity has been seeded.
    pub fn contains(&self, id: &RowId) -> bool {
        self.states.contains_key(id)
    }

    /// Flips one row's flag and returns the new state.
    ///
    /// Returns `None` for identities that were never seeded.
    pub fn toggle(&mut self, id: &RowId) -> Option<bool> {
        let state = self.states.get_mut(id)?;
        *state = !*state;
        Some(*state)
    }

    /// Collapses every row.
    /// Returns the identities that were expanded.
    pub fn collapse_all(&mut self) -> Vec<RowId> {
        let collapsed = self.expanded();
        for state in self.states.values_mut() {
            *state = false;
        }
        collapsed
    }

    /// Expanded identities (sorted for deterministic ordering).
    pub fn expanded(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self
            .states
            .iter()
            .filter(|&(_, &expanded)| expanded)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of tracked identities.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_does_not_reset_existing() {
        let mut tracker = ExpansionTracker::new();
        let a = RowId::from("a");
        tracker.seed([a.clone()]);
        tracker.toggle(&a);
        tracker.seed([a.clone(), RowId::from("b")]);
        assert!(tracker.is_expanded(&a));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_collapse_all() {
        let mut tracker = ExpansionTracker::new();
        tracker.seed([RowId::from("a"), RowId::from("b"), RowId::from("c")]);
        tracker.toggle(&RowId::from("b"));
        tracker.toggle(&RowId::from("a"));
        assert_eq!(tracker.collapse_all(), [RowId::from("a"), RowId::from("b")]);
        assert!(tracker.expanded().is_empty());
    }

    #[test]
    fn test_unseeded_identity_is_not_tracked() {
        let mut tracker = ExpansionTracker::new();
        tracker.seed([RowId::from("a")]);
        assert_eq!(tracker.toggle(&RowId::from("z")), None);
        assert!(!tracker.contains(&RowId::from("z")));
        assert_eq!(tracker.toggle(&RowId::from("a")), Some(true));
    }
}
