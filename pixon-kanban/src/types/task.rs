//! Task types: Task, Priority, Assignee

use super::ids::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Upper bound for [`Task::progress`]
pub const MAX_PROGRESS: u8 = 100;

/// Task priority, ordered from least to most pressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// All priorities in ascending order
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    /// Lowercase name, as used in filters and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                crate::KanbanError::invalid_value("priority", format!("unknown priority '{s}'"))
            })
    }
}

/// Display data for whoever a task is assigned to.
///
/// There is no identity system behind this: it is denormalized data the UI
/// renders next to the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Assignee {
    /// Create an assignee with just a display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    /// Set the avatar reference (URL or initials)
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A task/card on the kanban board.
///
/// A task's position within its column is not stored here; it is the
/// task's index in the board's per-column order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Labels with set semantics, kept in insertion order for display
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
    /// Completion percentage, 0..=100
    #[serde(default)]
    pub progress: u8,
    /// Accumulated tracked time in seconds
    #[serde(default)]
    pub time_spent: u64,
    /// Informational only; never enforced on moves
    #[serde(default)]
    pub blocked_by: Vec<TaskId>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Task {
    /// Create a new task with a fresh ID in the given column
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self::with_id(TaskId::new(), column_id, title)
    }

    /// Create a new task with an explicit ID
    pub fn with_id(
        id: impl Into<TaskId>,
        column_id: impl Into<ColumnId>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            title: title.into(),
            description: String::new(),
            priority: None,
            tags: Vec::new(),
            assignee: None,
            progress: 0,
            time_spent: 0,
            blocked_by: Vec::new(),
            custom_fields: BTreeMap::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the tags, dropping duplicates
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Set progress (clamped to 100)
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.set_progress(progress);
        self
    }

    /// Set blocking task references
    pub fn with_blocked_by(mut self, blocked_by: Vec<TaskId>) -> Self {
        self.blocked_by = blocked_by;
        self
    }

    /// Set a custom field
    pub fn with_custom_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_fields.insert(key.into(), value);
        self
    }

    /// Add a tag if not already present. Returns true if it was added.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag. Returns true if it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Check whether the task carries the tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Set progress, clamping to [`MAX_PROGRESS`]
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(MAX_PROGRESS);
    }

    /// Credit tracked seconds. Saturates instead of wrapping.
    pub fn add_time(&mut self, seconds: u64) {
        self.time_spent = self.time_spent.saturating_add(seconds);
    }
}
