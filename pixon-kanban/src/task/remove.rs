//! RemoveTask command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Board, TaskId};
use serde::{Deserialize, Serialize};

/// Remove a task from the board, closing the gap in its column.
///
/// Other tasks' `blocked_by` references to the removed task are dropped too.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoveTask {
    /// The task ID to remove
    pub id: TaskId,
}

impl_operation!(RemoveTask, verb = "remove", noun = "task");

impl RemoveTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Execute for RemoveTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        if !board.has_task(&self.id) {
            return Err(KanbanError::task_not_found(&self.id));
        }

        let mut next = board.clone();
        next.detach_task(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;
        next.forget_blocker(&self.id);

        Ok(next)
    }
}
