//! MoveTask command

use crate::error::{KanbanError, Result};
use crate::operation::{clamp_index, impl_operation, Execute};
use crate::types::{Board, ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Move a task to a column, optionally at a specific position.
///
/// `index` is interpreted against the destination column *after* the task
/// has been taken out of its current column, and is clamped to
/// `[0, len]`. Moving within the same column is a reorder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Destination column (may be the task's current column)
    pub column: ColumnId,
    /// Destination index; `None` appends to the end
    #[serde(default)]
    pub index: Option<isize>,
}

impl_operation!(MoveTask, verb = "move", noun = "task");

impl MoveTask {
    /// Move a task to the end of a column
    pub fn to_column(id: impl Into<TaskId>, column: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            index: None,
        }
    }

    /// Move a task to a column at a position
    pub fn new(id: impl Into<TaskId>, column: impl Into<ColumnId>, index: isize) -> Self {
        Self::to_column(id, column).at(index)
    }

    /// Set the destination index
    pub fn at(mut self, index: isize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Execute for MoveTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        if !board.has_task(&self.id) {
            return Err(KanbanError::task_not_found(&self.id));
        }
        if !board.has_column(&self.column) {
            return Err(KanbanError::column_not_found(&self.column));
        }

        let mut next = board.clone();
        let (mut task, _) = next
            .detach_task(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;

        task.column_id = self.column.clone();
        let len = next.column_task_count(&self.column);
        let index = self.index.map(|i| clamp_index(i, len));
        next.place_task(task, index);

        Ok(next)
    }
}
