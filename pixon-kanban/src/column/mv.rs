//! MoveColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{clamp_index, impl_operation, Execute};
use crate::types::{Board, ColumnId};
use serde::{Deserialize, Serialize};

/// Move a column to a new position in the column order.
///
/// Only the column order changes; no task is reordered or re-homed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoveColumn {
    pub id: ColumnId,
    /// Destination index within the post-removal column order (clamped)
    pub index: isize,
}

impl_operation!(MoveColumn, verb = "move", noun = "column");

impl MoveColumn {
    pub fn new(id: impl Into<ColumnId>, index: isize) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }
}

impl Execute for MoveColumn {
    fn execute(&self, board: &Board) -> Result<Board> {
        if !board.has_column(&self.id) {
            return Err(KanbanError::column_not_found(&self.id));
        }

        let mut next = board.clone();
        let len = next.column_order().len().saturating_sub(1);
        next.reorder_column(&self.id, clamp_index(self.index, len));
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board_with, ids_in};

    fn order(board: &Board) -> Vec<&str> {
        board.column_order().iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn test_move_column() {
        let board = board_with(&[("a", &["t1", "t2"]), ("b", &[]), ("c", &["t3"])]);

        let moved = MoveColumn::new("a", 2).execute(&board).unwrap();

        assert_eq!(order(&moved), vec!["b", "c", "a"]);
        // Task order is an independent axis
        assert_eq!(ids_in(&moved, "a"), vec!["t1", "t2"]);
        let titles: Vec<_> = moved.tasks().map(|t| t.id.as_str()).collect();
        assert_eq!(titles, vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_move_column_clamped() {
        let board = board_with(&[("a", &[]), ("b", &[]), ("c", &[])]);

        let moved = MoveColumn::new("c", -3).execute(&board).unwrap();
        assert_eq!(order(&moved), vec!["c", "a", "b"]);

        let moved = MoveColumn::new("a", 10).execute(&board).unwrap();
        assert_eq!(order(&moved), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_unknown_column_is_noop() {
        let board = board_with(&[("a", &[]), ("b", &[])]);

        let outcome = board.apply(&MoveColumn::new("zzz", 0));

        assert!(!outcome.took_effect());
        assert_eq!(outcome.board(), &board);
    }
}
