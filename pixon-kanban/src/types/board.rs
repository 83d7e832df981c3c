//! Board-level types: Board, Column
//!
//! The board keeps a flat task map keyed by ID next to one ordered ID list
//! per column. A task's position is its index in that list; nothing on the
//! task itself records rank, so inserts and removals never renumber anything.

use super::ids::{ColumnId, TaskId};
use super::task::Task;
use crate::error::{KanbanError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

/// A column defines a workflow stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display-only accent color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Soft work-in-progress cap. Exceeding it is allowed but reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<NonZeroUsize>,
}

impl Column {
    /// Create a new column
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: None,
            limit: None,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the WIP limit. A limit of zero means "no limit".
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = NonZeroUsize::new(limit);
        self
    }
}

/// The kanban board: ordered columns plus the tasks they contain.
///
/// Boards are values. Every command clones the board it is given and returns
/// the modified copy, so holders of the previous value never observe a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardDocument", into = "BoardDocument")]
pub struct Board {
    name: String,
    column_order: Vec<ColumnId>,
    columns: HashMap<ColumnId, Column>,
    task_order: HashMap<ColumnId, Vec<TaskId>>,
    tasks: IndexMap<TaskId, Task>,
}

impl Board {
    /// Create an empty board with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_order: Vec::new(),
            columns: HashMap::new(),
            task_order: HashMap::new(),
            tasks: IndexMap::new(),
        }
    }

    /// Create a board with the given columns, in order.
    ///
    /// Fails on duplicate column IDs.
    pub fn with_columns(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = Column>,
    ) -> Result<Self> {
        let mut board = Self::new(name);
        for column in columns {
            if board.has_column(&column.id) {
                return Err(KanbanError::duplicate_id("column", column.id.as_str()));
            }
            let end = board.column_order.len();
            board.insert_column(column, end);
        }
        Ok(board)
    }

    /// Get the default columns for a new board
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new("todo", "To Do"),
            Column::new("in-progress", "In Progress"),
            Column::new("done", "Done"),
        ]
    }

    /// Board display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column IDs in left-to-right order
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Columns in left-to-right order
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Find a column by ID
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Check whether a column exists
    pub fn has_column(&self, id: &ColumnId) -> bool {
        self.columns.contains_key(id)
    }

    /// Index of a column in the column order
    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.column_order.iter().position(|c| c == id)
    }

    /// Find a task by ID
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Check whether a task exists
    pub fn has_task(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Total number of tasks on the board
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Ordered task IDs of a column, or `None` for an unknown column
    pub fn column_task_ids(&self, column: &ColumnId) -> Option<&[TaskId]> {
        self.task_order.get(column).map(Vec::as_slice)
    }

    /// Tasks of a column in position order. Empty for an unknown column.
    pub fn tasks_in_column<'a>(&'a self, column: &ColumnId) -> impl Iterator<Item = &'a Task> + 'a {
        self.task_order
            .get(column)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id))
    }

    /// All tasks in board order: columns left to right, then by position
    pub fn tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.column_order
            .iter()
            .flat_map(|column| self.tasks_in_column(column))
    }

    /// Number of tasks currently in a column. Zero for an unknown column.
    pub fn column_task_count(&self, column: &ColumnId) -> usize {
        self.task_order.get(column).map_or(0, Vec::len)
    }

    /// Zero-based position of a task within its column
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        let task = self.tasks.get(id)?;
        self.task_order
            .get(&task.column_id)?
            .iter()
            .position(|t| t == id)
    }

    /// Check the structural invariants:
    ///
    /// 1. every task's column exists,
    /// 2. every column order lists each of its tasks exactly once,
    /// 3. every task appears in exactly one column order,
    /// 4. the column order lists each column exactly once.
    pub fn validate(&self) -> Result<()> {
        let mut seen_columns = HashSet::new();
        for id in &self.column_order {
            if !seen_columns.insert(id) {
                return Err(KanbanError::invariant(format!(
                    "column '{id}' appears twice in column order"
                )));
            }
            if !self.columns.contains_key(id) || !self.task_order.contains_key(id) {
                return Err(KanbanError::invariant(format!(
                    "column '{id}' is ordered but not defined"
                )));
            }
        }
        if seen_columns.len() != self.columns.len() || self.columns.len() != self.task_order.len()
        {
            return Err(KanbanError::invariant(
                "column definitions and column order disagree",
            ));
        }

        let mut placed = HashSet::new();
        for (column, ids) in &self.task_order {
            for id in ids {
                let task = self.tasks.get(id).ok_or_else(|| {
                    KanbanError::invariant(format!("column '{column}' lists unknown task '{id}'"))
                })?;
                if &task.column_id != column {
                    return Err(KanbanError::invariant(format!(
                        "task '{id}' is listed in '{column}' but belongs to '{}'",
                        task.column_id
                    )));
                }
                if !placed.insert(id) {
                    return Err(KanbanError::invariant(format!(
                        "task '{id}' appears more than once"
                    )));
                }
            }
        }

        if let Some(orphan) = self.tasks.keys().find(|id| !placed.contains(id)) {
            return Err(KanbanError::invariant(format!(
                "task '{orphan}' is not placed in any column"
            )));
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Crate-internal mutators. Commands call these on their own clone.
    // ---------------------------------------------------------------------

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Insert a column at `index` (must be `<= len`). Caller checks for duplicates.
    pub(crate) fn insert_column(&mut self, column: Column, index: usize) {
        let id = column.id.clone();
        self.column_order.insert(index, id.clone());
        self.task_order.insert(id.clone(), Vec::new());
        self.columns.insert(id, column);
    }

    /// Remove a column definition, returning its ordered task IDs.
    ///
    /// The tasks themselves stay in the task map; the caller must re-home or
    /// drop them before handing the board out.
    pub(crate) fn take_column(&mut self, id: &ColumnId) -> Option<(Column, Vec<TaskId>)> {
        let column = self.columns.remove(id)?;
        self.column_order.retain(|c| c != id);
        let order = self.task_order.remove(id).unwrap_or_default();
        Some((column, order))
    }

    /// Move a column to `index` within the post-removal column order
    pub(crate) fn reorder_column(&mut self, id: &ColumnId, index: usize) -> bool {
        let Some(from) = self.column_index(id) else {
            return false;
        };
        let id = self.column_order.remove(from);
        let index = index.min(self.column_order.len());
        self.column_order.insert(index, id);
        true
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.get_mut(id)
    }

    pub(crate) fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    /// Place a task in its column at `index` (clamped). Appends when `None`.
    ///
    /// The task's `column_id` must name an existing column.
    pub(crate) fn place_task(&mut self, task: Task, index: Option<usize>) {
        let order = self.task_order.entry(task.column_id.clone()).or_default();
        let index = index.map_or(order.len(), |i| i.min(order.len()));
        order.insert(index, task.id.clone());
        self.tasks.insert(task.id.clone(), task);
    }

    /// Drop every `blocked_by` reference to a task that is leaving the board
    pub(crate) fn forget_blocker(&mut self, id: &TaskId) {
        for task in self.tasks.values_mut() {
            task.blocked_by.retain(|b| b != id);
        }
    }

    /// Take a task out of the board, closing the gap in its column.
    /// Returns the task and the index it occupied.
    pub(crate) fn detach_task(&mut self, id: &TaskId) -> Option<(Task, usize)> {
        let task = self.tasks.shift_remove(id)?;
        let order = self.task_order.get_mut(&task.column_id)?;
        let index = order.iter().position(|t| t == id)?;
        order.remove(index);
        Some((task, index))
    }
}

/// Column-major wire shape: each column carries its tasks in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardDocument {
    name: String,
    #[serde(default)]
    columns: Vec<ColumnDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnDocument {
    #[serde(flatten)]
    column: Column,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl TryFrom<BoardDocument> for Board {
    type Error = KanbanError;

    fn try_from(doc: BoardDocument) -> Result<Self> {
        let mut board = Board::new(doc.name);
        for ColumnDocument { column, tasks } in doc.columns {
            if board.has_column(&column.id) {
                return Err(KanbanError::duplicate_id("column", column.id.as_str()));
            }
            let column_id = column.id.clone();
            let end = board.column_order.len();
            board.insert_column(column, end);

            for task in tasks {
                if task.column_id != column_id {
                    return Err(KanbanError::invariant(format!(
                        "task '{}' is listed in '{}' but belongs to '{}'",
                        task.id, column_id, task.column_id
                    )));
                }
                if board.has_task(&task.id) {
                    return Err(KanbanError::duplicate_id("task", task.id.as_str()));
                }
                board.place_task(task, None);
            }
        }
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for BoardDocument {
    fn from(board: Board) -> Self {
        let columns = board
            .column_order
            .iter()
            .filter_map(|id| {
                let column = board.columns.get(id)?.clone();
                let tasks = board.tasks_in_column(id).cloned().collect();
                Some(ColumnDocument { column, tasks })
            })
            .collect();
        Self {
            name: board.name,
            columns,
        }
    }
}
