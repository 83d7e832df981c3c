//! Board commands and board-wide read models

mod capacity;
mod rename;

pub use capacity::ColumnCapacity;
pub use rename::RenameBoard;
