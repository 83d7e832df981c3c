//! TagTask and UntagTask commands

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Board, TaskId};
use serde::{Deserialize, Serialize};

/// Add a tag to a task. Adding a tag the task already has is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TagTask {
    pub id: TaskId,
    pub tag: String,
}

impl_operation!(TagTask, verb = "tag", noun = "task");

impl TagTask {
    pub fn new(id: impl Into<TaskId>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }
}

impl Execute for TagTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        let tag = self.tag.trim();
        if tag.is_empty() {
            return Err(KanbanError::invalid_value("tag", "must not be empty"));
        }

        let mut next = board.clone();
        next.task_mut(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?
            .add_tag(tag);
        Ok(next)
    }
}

/// Remove a tag from a task. Removing an absent tag is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UntagTask {
    pub id: TaskId,
    pub tag: String,
}

impl_operation!(UntagTask, verb = "untag", noun = "task");

impl UntagTask {
    pub fn new(id: impl Into<TaskId>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }
}

impl Execute for UntagTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        let mut next = board.clone();
        next.task_mut(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?
            .remove_tag(self.tag.trim());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::board_with;

    #[test]
    fn test_tag_and_untag() {
        let board = board_with(&[("x", &["a"])]);

        let board = TagTask::new("a", "bug").execute(&board).unwrap();
        let board = TagTask::new("a", " ui ").execute(&board).unwrap();
        let board = TagTask::new("a", "bug").execute(&board).unwrap();
        assert_eq!(board.task(&"a".into()).unwrap().tags, vec!["bug", "ui"]);

        let board = UntagTask::new("a", "bug").execute(&board).unwrap();
        assert_eq!(board.task(&"a".into()).unwrap().tags, vec!["ui"]);
    }

    #[test]
    fn test_empty_tag_rejected() {
        let board = board_with(&[("x", &["a"])]);
        let result = TagTask::new("a", "  ").execute(&board);
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }

    #[test]
    fn test_tag_unknown_task() {
        let board = board_with(&[("x", &[])]);
        let result = TagTask::new("nope", "bug").execute(&board);
        assert!(matches!(result, Err(KanbanError::TaskNotFound { .. })));
    }
}
