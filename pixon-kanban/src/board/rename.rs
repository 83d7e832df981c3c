//! RenameBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{impl_operation, Execute};
use crate::types::Board;
use serde::{Deserialize, Serialize};

/// Change the board's display name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenameBoard {
    pub name: String,
}

impl_operation!(RenameBoard, verb = "rename", noun = "board");

impl RenameBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Execute for RenameBoard {
    fn execute(&self, board: &Board) -> Result<Board> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(KanbanError::invalid_value("name", "must not be empty"));
        }
        let mut next = board.clone();
        next.set_name(name);
        Ok(next)
    }
}
