//! Error types for the kanban engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations.
///
/// None of these are fatal: a rejected operation leaves the board unchanged
/// and the error is handed back to the caller for display.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A board failed structural validation
    #[error("board invariant violated: {message}")]
    Invariant { message: String },

    /// Engine configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl KanbanError {
    /// Create a task-not-found error
    pub fn task_not_found(id: impl ToString) -> Self {
        Self::TaskNotFound { id: id.to_string() }
    }

    /// Create a column-not-found error
    pub fn column_not_found(id: impl ToString) -> Self {
        Self::ColumnNotFound { id: id.to_string() }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// True when the error is a dangling reference (unknown task or column id)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::ColumnNotFound { .. })
    }
}

impl From<figment::Error> for KanbanError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
