//! Field path resolution for filtering and grouping.
//!
//! Paths are dotted: `priority`, `assignee.name`, `custom_fields.sprint`.
//! A leading segment that is not a built-in field is looked up in the
//! task's custom fields, so `sprint` and `custom_fields.sprint` are the same.

use crate::types::Task;
use serde_json::Value;

impl Task {
    /// Resolve a dotted field path. Missing and `null` values resolve to `None`.
    pub fn field(&self, path: &str) -> Option<Value> {
        let mut segments = path.trim().split('.').filter(|s| !s.is_empty());
        let head = segments.next()?;

        let root = match head {
            "id" => Value::from(self.id.as_str()),
            "column_id" | "columnId" | "column" => Value::from(self.column_id.as_str()),
            "title" => Value::from(self.title.as_str()),
            "description" => Value::from(self.description.as_str()),
            "priority" => Value::from(self.priority?.as_str()),
            "tags" => Value::from(self.tags.clone()),
            "assignee" => serde_json::to_value(self.assignee.as_ref()?).ok()?,
            "progress" => Value::from(self.progress),
            "time_spent" | "timeSpent" => Value::from(self.time_spent),
            "blocked_by" | "blockedBy" => Value::from(
                self.blocked_by
                    .iter()
                    .map(|id| id.as_str())
                    .collect::<Vec<_>>(),
            ),
            "custom_fields" | "customFields" => {
                let key = segments.next()?;
                self.custom_fields.get(key)?.clone()
            }
            other => self.custom_fields.get(other)?.clone(),
        };

        let value = segments.try_fold(root, |value, segment| match value {
            Value::Object(mut map) => map.remove(segment),
            Value::Array(mut items) => {
                let index = segment.parse::<usize>().ok()?;
                (index < items.len()).then(|| items.swap_remove(index))
            }
            _ => None,
        })?;

        (!value.is_null()).then_some(value)
    }
}

/// Every string a value contributes to membership tests.
///
/// Arrays contribute each element (any-of semantics for tags); scalars
/// contribute themselves; `null` contributes nothing.
pub(crate) fn value_strings(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(value_strings).collect(),
        other => vec![other.to_string()],
    }
}
