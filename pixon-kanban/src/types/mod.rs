//! Core types for the kanban engine

mod board;
mod ids;
pub(crate) mod patch;
mod task;

// Re-export all types
pub use board::{Board, Column};
pub use ids::{ColumnId, TaskId};
pub use task::{Assignee, Priority, Task, MAX_PROGRESS};
