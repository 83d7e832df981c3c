//! Read-only projections over a board: search, filters and grouping.
//!
//! Nothing in this module mutates a board. Views are cheap to recompute
//! (one pass over the tasks) and are meant to be rebuilt on every keystroke.

mod field;
mod filter;
mod group;

pub use filter::{filter_tasks, TaskFilter, TaskMatcher};
pub use group::{group_tasks, GroupKey, TaskGroup};

use crate::types::{Board, Task};
use serde::{Deserialize, Serialize};

/// The view state a board UI keeps next to the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub filter: TaskFilter,
    /// Field path to group by; `None` shows one flat group
    #[serde(default)]
    pub group_by: Option<String>,
}

impl ViewSettings {
    /// Filtered tasks in board order
    pub fn visible<'a>(&self, board: &'a Board) -> Vec<&'a Task> {
        filter_tasks(board, &self.filter)
    }

    /// Filtered tasks partitioned by `group_by`
    pub fn groups<'a>(&self, board: &'a Board) -> Vec<TaskGroup<'a>> {
        group_tasks(self.visible(board), self.group_by.as_deref())
    }
}
