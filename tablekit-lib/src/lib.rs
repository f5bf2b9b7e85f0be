//! Table data core
//!
//! Filtering, tri-state multi-column sorting, pagination, column reordering
//! and row expansion for tabular views. The presentation layer feeds
//! interaction events into a [`Table`](table::Table) and renders what it
//! returns.

pub mod column;
pub mod config;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod model;
pub mod page;
pub mod render;
pub mod sort;
pub mod table;

pub use error::TableError;
pub use table::{Table, TableEvent};
