//! AddColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{clamp_index, impl_operation, Execute};
use crate::types::{Board, Column, ColumnId};
use serde::{Deserialize, Serialize};

/// Add a new column to the board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column definition
    pub column: Column,
    /// Optional position in column order; appends when `None`
    #[serde(default)]
    pub index: Option<isize>,
}

impl_operation!(AddColumn, verb = "add", noun = "column");

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column: Column::new(id, title),
            index: None,
        }
    }

    /// Set the display color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.column = self.column.with_color(color);
        self
    }

    /// Set the WIP limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.column = self.column.with_limit(limit);
        self
    }

    /// Set the position in the column list
    pub fn at(mut self, index: isize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Execute for AddColumn {
    fn execute(&self, board: &Board) -> Result<Board> {
        if board.has_column(&self.column.id) {
            return Err(KanbanError::duplicate_id("column", self.column.id.as_str()));
        }

        let mut next = board.clone();
        let len = next.column_order().len();
        let index = self.index.map_or(len, |i| clamp_index(i, len));
        next.insert_column(self.column.clone(), index);
        Ok(next)
    }
}
