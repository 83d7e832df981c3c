//! UpdateTask command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Assignee, Board, Priority, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Update a task's fields. Never changes the task's column or position.
///
/// Fields left as `None` are untouched. For the clearable fields
/// (`priority`, `assignee`) `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::types::patch::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Option<Priority>>,
    /// Replacement tag list (duplicates dropped)
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "crate::types::patch::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<Option<Assignee>>,
    /// New progress, clamped to 100
    pub progress: Option<u8>,
    pub blocked_by: Option<Vec<TaskId>>,
    /// Custom fields to insert or overwrite
    #[serde(default)]
    pub set_fields: BTreeMap<String, Value>,
    /// Custom fields to delete
    #[serde(default)]
    pub remove_fields: Vec<String>,
}

impl_operation!(UpdateTask, verb = "update", noun = "task");

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(Some(priority));
        self
    }

    /// Unset the priority
    pub fn clear_priority(mut self) -> Self {
        self.priority = Some(None);
        self
    }

    /// Replace the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(Some(assignee));
        self
    }

    /// Unassign the task
    pub fn clear_assignee(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Set progress
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replace the blocking task references
    pub fn with_blocked_by(mut self, blocked_by: Vec<TaskId>) -> Self {
        self.blocked_by = Some(blocked_by);
        self
    }

    /// Set a custom field
    pub fn with_custom_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set_fields.insert(key.into(), value);
        self
    }

    /// Delete a custom field
    pub fn without_custom_field(mut self, key: impl Into<String>) -> Self {
        self.remove_fields.push(key.into());
        self
    }
}

impl Execute for UpdateTask {
    fn execute(&self, board: &Board) -> Result<Board> {
        if !board.has_task(&self.id) {
            return Err(KanbanError::task_not_found(&self.id));
        }
        if let Some(blocked_by) = &self.blocked_by {
            if blocked_by.contains(&self.id) {
                return Err(KanbanError::invalid_value(
                    "blocked_by",
                    format!("task '{}' cannot block itself", self.id),
                ));
            }
        }

        let mut next = board.clone();
        let task = next
            .task_mut(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(tags) = &self.tags {
            task.tags.clear();
            for tag in tags {
                task.add_tag(tag.clone());
            }
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee.clone();
        }
        if let Some(progress) = self.progress {
            task.set_progress(progress);
        }
        if let Some(blocked_by) = &self.blocked_by {
            task.blocked_by = blocked_by.clone();
        }
        for key in &self.remove_fields {
            task.custom_fields.remove(key);
        }
        for (key, value) in &self.set_fields {
            task.custom_fields.insert(key.clone(), value.clone());
        }

        Ok(next)
    }
}
