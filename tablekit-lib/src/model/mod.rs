//! Row and cell model

mod record;
mod value;

pub use record::{Record, TableRow};
pub use value::Value;
