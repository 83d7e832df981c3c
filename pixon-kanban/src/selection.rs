//! Multi-select state for bulk actions.
//!
//! Selection lives beside the board, not inside it. Bulk actions go through
//! the regular commands one task at a time and then prune the selection so
//! it never refers to tasks that are gone.

use crate::operation::Execute;
use crate::task::{MoveTask, RemoveTask};
use crate::types::{Board, ColumnId, TaskId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An insertion-ordered set of selected task IDs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: IndexSet<TaskId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of a task. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Add a task to the selection
    pub fn select(&mut self, id: impl Into<TaskId>) {
        self.ids.insert(id.into());
    }

    /// Remove a task from the selection
    pub fn deselect(&mut self, id: &TaskId) -> bool {
        self.ids.shift_remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected IDs in the order they were selected
    pub fn iter(&self) -> impl Iterator<Item = &TaskId> + '_ {
        self.ids.iter()
    }

    /// Drop IDs that no longer exist on the board. Returns how many were dropped.
    pub fn prune(&mut self, board: &Board) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| board.has_task(id));
        let dropped = before - self.ids.len();
        if dropped > 0 {
            debug!(dropped, "pruned stale selection");
        }
        dropped
    }

    /// Remove every selected task, then clear the selection.
    ///
    /// Each ID goes through [`RemoveTask`]; IDs that are already gone are
    /// skipped rather than aborting the batch.
    pub fn remove_selected(&mut self, board: &Board) -> Board {
        let mut next = board.clone();
        for id in &self.ids {
            match RemoveTask::new(id.clone()).execute(&next) {
                Ok(updated) => next = updated,
                Err(error) => warn!(%id, %error, "skipping selected task"),
            }
        }
        self.clear();
        next
    }

    /// Append every selected task to `column`, in selection order.
    ///
    /// Returns the board unchanged when the column does not exist. The
    /// selection is kept (minus stale IDs) so the user can act on it again.
    pub fn move_selected(&mut self, board: &Board, column: &ColumnId) -> Board {
        let mut next = board.clone();
        for id in &self.ids {
            match MoveTask::to_column(id.clone(), column.clone()).execute(&next) {
                Ok(updated) => next = updated,
                Err(error) => warn!(%id, %column, %error, "skipping selected task"),
            }
        }
        self.prune(&next);
        next
    }
}

impl<T: Into<TaskId>> FromIterator<T> for Selection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board_with, ids_in};

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle("a"));
        assert!(selection.contains(&"a".into()));
        assert!(!selection.toggle("a"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_prune_after_removal() {
        let board = board_with(&[("x", &["1", "2", "3"])]);
        let mut selection: Selection = ["1", "2", "3"].into_iter().collect();

        let board = RemoveTask::new("2").execute(&board).unwrap();
        assert_eq!(selection.prune(&board), 1);

        let ids: Vec<_> = selection.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test_log::test]
    fn test_remove_selected() {
        let board = board_with(&[("x", &["a", "b", "c"]), ("y", &["d"])]);
        let mut selection: Selection = ["a", "d", "ghost"].into_iter().collect();

        let next = selection.remove_selected(&board);

        assert_eq!(ids_in(&next, "x"), vec!["b", "c"]);
        assert!(ids_in(&next, "y").is_empty());
        assert!(selection.is_empty());
        assert!(next.validate().is_ok());
        // Input board untouched
        assert_eq!(board.task_count(), 4);
    }

    #[test]
    fn test_move_selected() {
        let board = board_with(&[("x", &["a", "b", "c"]), ("y", &["d"])]);
        let mut selection: Selection = ["c", "a"].into_iter().collect();

        let next = selection.move_selected(&board, &"y".into());

        assert_eq!(ids_in(&next, "x"), vec!["b"]);
        assert_eq!(ids_in(&next, "y"), vec!["d", "c", "a"]);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_move_selected_to_unknown_column() {
        let board = board_with(&[("x", &["a"])]);
        let mut selection: Selection = ["a"].into_iter().collect();

        let next = selection.move_selected(&board, &"nowhere".into());

        assert_eq!(next, board);
    }
}
