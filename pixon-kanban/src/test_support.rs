//! Fixtures shared by unit and integration tests.
//!
//! Compiled for this crate's own tests and for consumers that enable the
//! `test-support` feature.

use crate::types::{Board, Column, Task};

/// Build a board from `(column_id, [task_id, ...])` pairs.
///
/// Column titles are the upper-cased IDs; task titles equal their IDs.
pub fn board_with(columns: &[(&str, &[&str])]) -> Board {
    let mut board = Board::with_columns(
        "Test",
        columns
            .iter()
            .map(|(id, _)| Column::new(*id, id.to_uppercase())),
    )
    .expect("fixture column IDs must be unique");

    for (column, tasks) in columns {
        for id in *tasks {
            board.place_task(Task::with_id(*id, *column, *id), None);
        }
    }
    board
}

/// Task IDs of a column, in position order
pub fn ids_in(board: &Board, column: &str) -> Vec<String> {
    board
        .column_task_ids(&(*column).into())
        .unwrap_or_default()
        .iter()
        .map(|id| id.to_string())
        .collect()
}
