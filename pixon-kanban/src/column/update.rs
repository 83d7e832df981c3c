//! UpdateColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::{Board, ColumnId};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Update a column's display data or WIP limit
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    pub title: Option<String>,
    /// `Some(None)` clears the color
    #[serde(
        default,
        deserialize_with = "crate::types::patch::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
    /// `Some(None)` removes the limit
    #[serde(
        default,
        deserialize_with = "crate::types::patch::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<Option<NonZeroUsize>>,
}

impl_operation!(UpdateColumn, verb = "update", noun = "column");

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(Some(color.into()));
        self
    }

    pub fn clear_color(mut self) -> Self {
        self.color = Some(None);
        self
    }

    /// Set the WIP limit; zero removes it
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(NonZeroUsize::new(limit));
        self
    }

    pub fn clear_limit(mut self) -> Self {
        self.limit = Some(None);
        self
    }
}

impl Execute for UpdateColumn {
    fn execute(&self, board: &Board) -> Result<Board> {
        let mut next = board.clone();
        let column = next
            .column_mut(&self.id)
            .ok_or_else(|| KanbanError::column_not_found(&self.id))?;

        if let Some(title) = &self.title {
            column.title = title.clone();
        }
        if let Some(color) = &self.color {
            column.color = color.clone();
        }
        if let Some(limit) = self.limit {
            column.limit = limit;
        }

        Ok(next)
    }
}
