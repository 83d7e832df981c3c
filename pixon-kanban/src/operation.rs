//! Operation traits and the outcome of applying one to a board.
//!
//! Commands are structs whose fields ARE the parameters. Each one names
//! itself through [`Operation`] and transforms a board through [`Execute`].
//! [`Board::apply`] wraps execution in the engine's recovery policy: a
//! failed command never changes the board, it only reports why.

use crate::error::{KanbanError, Result};
use crate::types::Board;
use tracing::{debug, warn};

/// Metadata every command carries
pub trait Operation {
    /// The action, e.g. `"move"`
    fn verb(&self) -> &'static str;

    /// The thing acted upon, e.g. `"task"`
    fn noun(&self) -> &'static str;

    /// `"verb noun"`, used in logs
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// A command that produces a new board from an existing one.
///
/// Implementations must not leave partial changes behind: either the
/// returned board reflects the whole command, or an error is returned.
pub trait Execute: Operation {
    fn execute(&self, board: &Board) -> Result<Board>;
}

/// Implement [`Operation`] for a command type.
///
/// ```ignore
/// impl_operation!(MoveTask, verb = "move", noun = "task");
/// ```
macro_rules! impl_operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal) => {
        impl $crate::operation::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }

            fn noun(&self) -> &'static str {
                $noun
            }
        }
    };
}

pub(crate) use impl_operation;

/// Result of applying a command under the no-op-on-failure policy
#[derive(Debug)]
pub enum Outcome {
    /// The command took effect
    Applied(Board),
    /// The command was rejected; `board` is the unchanged input
    Rejected { board: Board, error: KanbanError },
}

impl Outcome {
    /// Whether the command changed anything
    pub fn took_effect(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The rejection reason, if any
    pub fn error(&self) -> Option<&KanbanError> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }

    /// The resulting board (the input board when rejected)
    pub fn board(&self) -> &Board {
        match self {
            Self::Applied(board) | Self::Rejected { board, .. } => board,
        }
    }

    /// Take the resulting board, discarding the error
    pub fn into_board(self) -> Board {
        match self {
            Self::Applied(board) | Self::Rejected { board, .. } => board,
        }
    }

    /// Convert into a plain result
    pub fn into_result(self) -> Result<Board> {
        match self {
            Self::Applied(board) => Ok(board),
            Self::Rejected { error, .. } => Err(error),
        }
    }

    /// Split into the resulting board and the rejection reason
    pub fn split(self) -> (Board, Option<KanbanError>) {
        match self {
            Self::Applied(board) => (board, None),
            Self::Rejected { board, error } => (board, Some(error)),
        }
    }
}

impl Board {
    /// Apply a command, returning the new board or the unchanged board plus
    /// the reason it was rejected.
    pub fn apply<O: Execute + ?Sized>(&self, op: &O) -> Outcome {
        match op.execute(self) {
            Ok(board) => {
                debug!(op = %op.op_string(), board = %self.name(), "applied");
                Outcome::Applied(board)
            }
            Err(error) => {
                warn!(op = %op.op_string(), board = %self.name(), %error, "rejected");
                Outcome::Rejected {
                    board: self.clone(),
                    error,
                }
            }
        }
    }
}

/// Clamp a possibly out-of-range insertion index into `[0, len]`.
///
/// Drag-and-drop coordinate math routinely yields `-1` or `len + 1`; both are
/// treated as the nearest valid slot.
pub fn clamp_index(index: isize, len: usize) -> usize {
    if index < 0 {
        0
    } else {
        (index as usize).min(len)
    }
}
