//! AddTask command

use crate::error::{KanbanError, Result};
use crate::operation::{clamp_index, impl_operation, Execute};
use crate::types::{Assignee, Board, ColumnId, Priority, Task, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Add a new task to a column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTask {
    /// The task to insert; its `column_id` is the destination column
    pub task: Task,
    /// Insertion index within the column; `None` appends
    #[serde(default)]
    pub index: Option<isize>,
}

impl_operation!(AddTask, verb = "add", noun = "task");

impl AddTask {
    /// Create a new AddTask command with a fresh ID
    pub fn new(column: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self::from_task(Task::new(column, title))
    }

    /// Add an already-built task to its `column_id`
    pub fn from_task(task: Task) -> Self {
        Self { task, index: None }
    }

    /// The ID the task will have once added
    pub fn id(&self) -> &TaskId {
        &self.task.id
    }

    /// Use an explicit ID instead of a freshly minted one
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.task.id = id.into();
        self
    }

    /// Insert at a position instead of appending
    pub fn at(mut self, index: isize) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.task.priority = Some(priority);
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task = self.task.with_tags(tags);
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.task.assignee = Some(assignee);
        self
    }

    /// Set the initial progress
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.task.set_progress(progress);
        self
    }

    /// Set the blocking task references
    pub fn with_blocked_by(mut self, blocked_by: Vec<TaskId>) -> Self {
        self.task.blocked_by = blocked_by;
        self
    }

    /// Set a custom field
    pub fn with_custom_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.task.custom_fields.insert(key.into(), value);
        self
    }
}

impl Execute for AddTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        let column = &self.task.column_id;
        if !board.has_column(column) {
            return Err(KanbanError::column_not_found(column));
        }
        if board.has_task(&self.task.id) {
            return Err(KanbanError::duplicate_id("task", self.task.id.as_str()));
        }

        let mut task = self.task.clone();
        // Hand-built tasks may carry an out-of-range value
        task.set_progress(task.progress);

        let mut next = board.clone();
        let len = next.column_task_count(column);
        let index = self.index.map(|i| clamp_index(i, len));
        next.place_task(task, index);

        Ok(next)
    }
}
