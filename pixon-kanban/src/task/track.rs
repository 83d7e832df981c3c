//! RecordTime command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Board, TaskId};
use serde::{Deserialize, Serialize};

/// Credit tracked seconds to a task's `time_spent`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordTime {
    pub id: TaskId,
    pub seconds: u64,
}

impl_operation!(RecordTime, verb = "track", noun = "task");

impl RecordTime {
    pub fn new(id: impl Into<TaskId>, seconds: u64) -> Self {
        Self {
            id: id.into(),
            seconds,
        }
    }
}

impl Execute for RecordTime {
    fn execute(&self, board: &Board) -> Result<Board> {
        let mut next = board.clone();
        next.task_mut(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?
            .add_time(self.seconds);
        Ok(next)
    }
}
