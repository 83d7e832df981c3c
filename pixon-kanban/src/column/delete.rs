//! DeleteColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Board, ColumnId};
use serde::{Deserialize, Serialize};

/// What happens to the tasks of a deleted column
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDisposition {
    /// Append the tasks, in their current order, to another column
    ReassignTo(ColumnId),
    /// Remove the tasks from the board
    DiscardTasks,
}

/// Delete a column. Its tasks are re-homed or discarded explicitly, so no
/// task is ever left pointing at a column that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
    pub disposition: ColumnDisposition,
}

impl_operation!(DeleteColumn, verb = "delete", noun = "column");

impl DeleteColumn {
    /// Delete a column, moving its tasks to the end of `target`
    pub fn reassigning_to(id: impl Into<ColumnId>, target: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            disposition: ColumnDisposition::ReassignTo(target.into()),
        }
    }

    /// Delete a column along with its tasks
    pub fn discarding_tasks(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            disposition: ColumnDisposition::DiscardTasks,
        }
    }
}

impl Execute for DeleteColumn {
    fn execute(&self, board: &Board) -> Result<Board> {
        let task_ids = board
            .column_task_ids(&self.id)
            .ok_or_else(|| KanbanError::column_not_found(&self.id))?
            .to_vec();

        if let ColumnDisposition::ReassignTo(target) = &self.disposition {
            if target == &self.id {
                return Err(KanbanError::invalid_value(
                    "disposition",
                    format!("cannot reassign tasks of '{}' to itself", self.id),
                ));
            }
            if !board.has_column(target) {
                return Err(KanbanError::column_not_found(target));
            }
        }

        let mut next = board.clone();
        let mut detached = Vec::with_capacity(task_ids.len());
        for id in &task_ids {
            let (task, _) = next
                .detach_task(id)
                .ok_or_else(|| KanbanError::task_not_found(id))?;
            detached.push(task);
        }
        next.take_column(&self.id);

        match &self.disposition {
            ColumnDisposition::ReassignTo(target) => {
                for mut task in detached {
                    task.column_id = target.clone();
                    next.place_task(task, None);
                }
            }
            ColumnDisposition::DiscardTasks => {
                for task in &detached {
                    next.forget_blocker(&task.id);
                }
            }
        }

        Ok(next)
    }
}
