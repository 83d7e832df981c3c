//! Strongly typed identifiers.
//!
//! IDs are opaque strings. Freshly minted IDs are ULIDs, but any string read
//! from a host (e.g. `"todo"` for a column) is accepted as-is.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a new ULID-based ID
            pub fn new() -> Self {
                Self(Ulid::new().to_string())
            }

            /// Wrap an existing string ID
            pub fn from_string(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a task, stable for the task's lifetime
    TaskId
);

define_id!(
    /// Identifier of a column
    ColumnId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_ulids() {
        let id = TaskId::new();
        assert_eq!(id.as_str().len(), 26);
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn test_from_string() {
        let id = ColumnId::from("todo");
        assert_eq!(id.as_str(), "todo");
        assert_eq!(id.to_string(), "todo");
        assert_eq!(id, ColumnId::from_string("todo"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = TaskId::from("t-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t-1\"");
        let parsed: TaskId = serde_json::from_str("\"t-1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
