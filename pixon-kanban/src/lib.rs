//! Kanban board state engine
//!
//! This crate holds the state of a kanban board and the commands that change
//! it. It does no rendering and no I/O; a UI layer hands it user intents and
//! renders whatever board comes back.
//!
//! ## Overview
//!
//! - **Value semantics** - every command takes a `&Board` and returns a new
//!   `Board`; the input is never touched
//! - **No partial updates** - a rejected command leaves the board exactly as
//!   it was and reports why
//! - **Two-level layout** - a flat task map plus one ordered ID list per
//!   column; a task's position is its index in that list
//! - **Derived views** - search, field filters and grouping are read-only
//!   projections
//!
//! ## Basic Usage
//!
//! ```rust
//! use pixon_kanban::{task::{AddTask, MoveTask}, Board, Execute};
//!
//! # fn main() -> pixon_kanban::Result<()> {
//! let board = Board::with_columns("Sprint", Board::default_columns())?;
//!
//! let add = AddTask::new("todo", "Fix login bug");
//! let id = add.id().clone();
//! let board = add.execute(&board)?;
//!
//! // Drag into "done" at the top
//! let board = MoveTask::new(id.clone(), "done", 0).execute(&board)?;
//! assert_eq!(board.task(&id).map(|t| t.column_id.as_str()), Some("done"));
//! # Ok(())
//! # }
//! ```
//!
//! Hosts that keep a selection, filters and a running timer next to the
//! board use [`BoardSession`], which keeps all of them consistent with the
//! board after every command.

pub mod config;
mod error;
mod operation;
pub mod selection;
pub mod session;
pub mod timer;
pub mod types;
pub mod view;

// Command modules
pub mod board;
pub mod column;
pub mod task;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::{ColumnConfig, EngineConfig};
pub use error::{KanbanError, Result};
pub use operation::{clamp_index, Execute, Operation, Outcome};
pub use selection::Selection;
pub use session::BoardSession;
pub use timer::{ActiveTimer, Tick, TimerDriver};

// Re-export commonly used types
pub use types::{Assignee, Board, Column, ColumnId, Priority, Task, TaskId, MAX_PROGRESS};
pub use view::{GroupKey, TaskFilter, TaskGroup, ViewSettings};
