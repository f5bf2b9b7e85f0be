//! Interaction entry points for the Table.
//!
//! The presentation layer forwards user input here. Each handler updates
//! state, rebuilds the view when needed, and reports what changed both as
//! its return value and on the event queue drained by
//! [`Table::drain_events`]. The queue keeps at most
//! [`EVENT_QUEUE_CAPACITY`] events and drops the oldest beyond that, so
//! callers that only use return values never need to drain it.

use crate::error::TableError;
use crate::expansion::RowId;
use crate::filter::GLOBAL_KEY;
use crate::model::TableRow;
use crate::page::PageButton;
use crate::sort::SortDirection;

use super::Table;

/// Maximum number of undrained events kept by a [`Table`].
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// A state change caused by an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A column's sort direction changed.
    Sorted {
        column: String,
        direction: SortDirection,
    },
    /// A filter value changed; `displayed` is the new row count.
    Filtered {
        key: String,
        value: String,
        displayed: usize,
    },
    /// Columns were reordered.
    ColumnsReordered { order: Vec<String> },
    /// The current page changed.
    PageChanged { page: usize },
    /// A row was expanded or collapsed.
    RowToggled { id: RowId, expanded: bool },
}

impl<R: TableRow> Table<R> {
    fn push_event(&mut self, event: TableEvent) -> TableEvent {
        log::debug!("Table event: {:?}", event);
        if self.events.len() == EVENT_QUEUE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event.clone());
        event
    }

    /// Take the queued events, oldest first.
    ///
    /// Holds the last [`EVENT_QUEUE_CAPACITY`] events raised since the
    /// previous call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        self.events.drain(..).collect()
    }

    /// Handle header click for sorting.
    ///
    /// Returns `None` for unknown or unsortable columns.
    pub fn on_header_click(&mut self, key: &str) -> Option<TableEvent> {
        let Some(column) = self.columns.get(key) else {
            log::warn!("Header click on unknown column '{}'", key);
            return None;
        };

        if !column.sortable {
            log::debug!("Header click on unsortable column '{}' ignored", key);
            return None;
        }

        let direction = self.toggle_sort(key);
        Some(self.push_event(TableEvent::Sorted {
            column: key.to_string(),
            direction,
        }))
    }

    /// Handle an edit of a filter input.
    ///
    /// `key` is a column key or [`GLOBAL_KEY`]. Returns to page 1.
    pub fn on_filter_change(&mut self, key: &str, value: &str) -> TableEvent {
        if key != GLOBAL_KEY && !self.columns.contains(key) {
            log::debug!("Filter on '{}' which is not a declared column", key);
        }
        self.set_filter_value(key, value);
        let displayed = self.displayed_len();
        self.push_event(TableEvent::Filtered {
            key: key.to_string(),
            value: value.to_string(),
            displayed,
        })
    }

    /// Handle a finished column drag.
    ///
    /// The new order must be a permutation of the current column keys.
    /// Filtering, sorting, paging and expansion are unaffected.
    pub fn on_columns_reordered<S: AsRef<str>>(
        &mut self,
        new_order: &[S],
    ) -> Result<TableEvent, TableError> {
        self.columns.reorder(new_order)?;
        let order = self.columns.order();
        Ok(self.push_event(TableEvent::ColumnsReordered { order }))
    }

    /// Handle a pagination button.
    ///
    /// Returns `None` when the page did not change, e.g. "next" on the last
    /// page.
    pub fn on_page_button(&mut self, button: PageButton) -> Option<TableEvent> {
        let total = self.displayed_len();
        if !self.pagination.navigate(button, total) {
            return None;
        }
        let page = self.pagination.current_page();
        Some(self.push_event(TableEvent::PageChanged { page }))
    }

    /// Handle a click on a row's expander.
    pub fn on_expander_click(&mut self, id: &RowId) -> Result<TableEvent, TableError> {
        let expanded = self.toggle_expanded(id)?;
        Ok(self.push_event(TableEvent::RowToggled {
            id: id.clone(),
            expanded,
        }))
    }
}
