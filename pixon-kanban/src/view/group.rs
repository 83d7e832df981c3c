//! Grouping of (already filtered) tasks by a field path

use super::field::value_strings;
use crate::types::Task;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

/// Bucket identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GroupKey {
    /// No grouping requested; the single bucket holds everything
    All,
    /// Tasks whose field resolved to this value
    Value(String),
    /// Tasks whose field holds this set of values, sorted and deduplicated
    Values(Vec<String>),
    /// Tasks with no value for the field
    Ungrouped,
}

impl GroupKey {
    /// Display label, using `ungrouped_label` for the sentinel bucket
    pub fn label<'a>(&'a self, ungrouped_label: &'a str) -> Cow<'a, str> {
        match self {
            Self::All => Cow::Borrowed("All"),
            Self::Value(value) => Cow::Borrowed(value),
            Self::Values(values) => Cow::Owned(values.join(", ")),
            Self::Ungrouped => Cow::Borrowed(ungrouped_label),
        }
    }

    /// Bucket for a resolved field value.
    ///
    /// Arrays group by the set of their elements, so order and duplicates do
    /// not matter. Empty strings and empty arrays have no key.
    fn for_value(value: &Value) -> Option<Self> {
        let mut values: Vec<String> = value_strings(value)
            .into_iter()
            .filter(|v| !v.is_empty())
            .collect();
        values.sort();
        values.dedup();
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Value),
            _ => Some(Self::Values(values)),
        }
    }
}

/// One bucket of tasks
#[derive(Debug, Clone, Serialize)]
pub struct TaskGroup<'a> {
    pub key: GroupKey,
    pub tasks: Vec<&'a Task>,
}

/// Partition tasks by the value at `group_by`.
///
/// Buckets appear in the order their first task appears, with the ungrouped
/// bucket last. Tasks keep their input order inside each bucket. Without a
/// field path, everything goes into a single [`GroupKey::All`] bucket.
pub fn group_tasks<'a, I>(tasks: I, group_by: Option<&str>) -> Vec<TaskGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let Some(path) = group_by.map(str::trim).filter(|p| !p.is_empty()) else {
        return vec![TaskGroup {
            key: GroupKey::All,
            tasks: tasks.into_iter().collect(),
        }];
    };

    let mut buckets: IndexMap<GroupKey, Vec<&'a Task>> = IndexMap::new();
    let mut ungrouped = Vec::new();
    for task in tasks {
        match task.field(path).as_ref().and_then(GroupKey::for_value) {
            Some(key) => buckets.entry(key).or_default().push(task),
            None => ungrouped.push(task),
        }
    }

    let mut groups: Vec<TaskGroup<'a>> = buckets
        .into_iter()
        .map(|(key, tasks)| TaskGroup { key, tasks })
        .collect();
    if !ungrouped.is_empty() {
        groups.push(TaskGroup {
            key: GroupKey::Ungrouped,
            tasks: ungrouped,
        });
    }
    groups
}
