//! Table assembly and serialization.

mod table;
mod writer;

pub use table::OutputTable;
pub use writer::{write_table, SheetFormat};
