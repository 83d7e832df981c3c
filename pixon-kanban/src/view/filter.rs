//! Search and field filters

use super::field::value_strings;
use crate::types::{Board, Priority, Task};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Free-text search plus per-field membership filters.
///
/// A task matches when the query is a case-insensitive substring of its
/// title or description, and, for every field with a non-empty value set,
/// at least one of the task's values for that field is in the set.
///
/// The query is used as typed, surrounding whitespace included. Field values
/// are compared exactly, except `priority` values which are matched by name
/// regardless of case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(default)]
    pub query: String,
    /// Field path -> accepted values
    #[serde(default)]
    pub fields: BTreeMap<String, BTreeSet<String>>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Accept only the given priorities
    pub fn with_priorities(self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.with_field("priority", priorities.into_iter().map(|p| p.as_str()))
    }

    /// Accept tasks carrying any of the given tags
    pub fn with_tags<I, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_field("tags", tags)
    }

    /// Accept only tasks whose value at `path` is one of `values`
    pub fn with_field<I, S>(mut self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_field(path, values);
        self
    }

    /// Replace the accepted values of a field. An empty set clears the filter.
    pub fn set_field<I, S>(&mut self, path: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into();
        let values: BTreeSet<String> = values
            .into_iter()
            .map(|v| normalize_value(&path, v.into()))
            .collect();
        if values.is_empty() {
            self.fields.remove(&path);
        } else {
            self.fields.insert(path, values);
        }
    }

    /// Drop the filter on one field
    pub fn clear_field(&mut self, path: &str) {
        self.fields.remove(path);
    }

    /// Drop the query and every field filter
    pub fn clear(&mut self) {
        self.query.clear();
        self.fields.clear();
    }

    /// True when the filter can exclude anything
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.fields.values().any(|v| !v.is_empty())
    }

    /// Prepare the filter for a pass over many tasks
    pub fn matcher(&self) -> TaskMatcher<'_> {
        TaskMatcher {
            query: (!self.query.is_empty()).then(|| self.query.to_lowercase()),
            fields: self
                .fields
                .iter()
                .filter(|(_, accepted)| !accepted.is_empty())
                .map(|(path, accepted)| {
                    let accepted: BTreeSet<String> = accepted
                        .iter()
                        .map(|v| normalize_value(path, v.clone()))
                        .collect();
                    (path.as_str(), accepted)
                })
                .collect(),
        }
    }

    /// Check a single task
    pub fn matches(&self, task: &Task) -> bool {
        self.matcher().matches(task)
    }
}

/// A [`TaskFilter`] with its query lowercased and field values normalized once
#[derive(Debug)]
pub struct TaskMatcher<'a> {
    query: Option<String>,
    fields: Vec<(&'a str, BTreeSet<String>)>,
}

impl TaskMatcher<'_> {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(query) = &self.query {
            let hit = task.title.to_lowercase().contains(query)
                || task.description.to_lowercase().contains(query);
            if !hit {
                return false;
            }
        }

        self.fields.iter().all(|(path, accepted)| {
            task.field(path)
                .map(|value| value_strings(&value))
                .unwrap_or_default()
                .iter()
                .any(|v| accepted.contains(v))
        })
    }
}

/// Priority names are stored lowercase; anything else is kept as given
fn normalize_value(path: &str, value: String) -> String {
    if path != "priority" {
        return value;
    }
    match value.parse::<Priority>() {
        Ok(priority) => priority.as_str().to_string(),
        Err(_) => value,
    }
}

/// Tasks matching `filter`, in board order
pub fn filter_tasks<'a>(board: &'a Board, filter: &TaskFilter) -> Vec<&'a Task> {
    let matcher = filter.matcher();
    board.tasks().filter(|task| matcher.matches(task)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Execute;
    use crate::task::UpdateTask;
    use crate::test_support::board_with;
    use crate::types::Assignee;

    fn login_task() -> Task {
        Task::with_id("t1", "todo", "Fix login bug")
            .with_description("Session cookie expires early")
            .with_priority(Priority::Medium)
            .with_tags(["auth", "bug"])
    }

    #[test]
    fn test_query_matches_title_case_insensitively() {
        let task = login_task();
        assert!(TaskFilter::new().with_query("login").matches(&task));
        assert!(TaskFilter::new().with_query("LOGIN").matches(&task));
        assert!(TaskFilter::new().with_query("cookie").matches(&task));
        assert!(!TaskFilter::new().with_query("logout").matches(&task));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = TaskFilter::new().with_query("");
        assert!(!filter.is_active());
        assert!(filter.matches(&login_task()));
        assert!(filter.matches(&Task::new("todo", "")));
    }

    #[test]
    fn test_query_whitespace_is_significant() {
        let task = login_task();
        let trailing = TaskFilter::new().with_query("bug ");
        assert!(trailing.is_active());
        assert!(!trailing.matches(&task));
        assert!(TaskFilter::new().with_query("login ").matches(&task));
        assert!(!TaskFilter::new().with_query("   ").matches(&task));
    }

    #[test]
    fn test_priority_values_ignore_case() {
        let task = login_task();
        let filter = TaskFilter::new().with_field("priority", ["Medium"]);
        assert_eq!(
            filter.fields["priority"],
            BTreeSet::from(["medium".to_string()])
        );
        assert!(filter.matches(&task));

        // Filters built without going through set_field match the same way
        let mut raw = TaskFilter::new();
        raw.fields
            .insert("priority".into(), BTreeSet::from(["MEDIUM".to_string()]));
        assert!(raw.matches(&task));

        assert!(!TaskFilter::new()
            .with_field("priority", ["High"])
            .matches(&task));
        assert!(!TaskFilter::new()
            .with_field("assignee.name", ["ada"])
            .matches(&task.with_assignee(Assignee::new("Ada"))));
    }

    #[test]
    fn test_priority_filter_overrides_text() {
        let task = login_task();
        let filter = TaskFilter::new()
            .with_query("login")
            .with_priorities([Priority::High]);
        assert!(filter.is_active());
        assert!(!filter.matches(&task));

        let filter = filter.with_priorities([Priority::High, Priority::Medium]);
        assert!(filter.matches(&task));
    }

    #[test]
    fn test_unset_priority_fails_active_filter() {
        let task = Task::with_id("t2", "todo", "No priority");
        assert!(!TaskFilter::new()
            .with_priorities([Priority::Low])
            .matches(&task));
    }

    #[test]
    fn test_tags_any_of() {
        let task = login_task();
        assert!(TaskFilter::new().with_tags(["bug", "ui"]).matches(&task));
        assert!(!TaskFilter::new().with_tags(["ui"]).matches(&task));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let task = login_task();
        let filter = TaskFilter::new()
            .with_tags(["bug"])
            .with_priorities([Priority::Urgent]);
        assert!(!filter.matches(&task));
    }

    #[test]
    fn test_empty_field_set_clears_filter() {
        let mut filter = TaskFilter::new().with_tags(["ui"]);
        filter.set_field("tags", Vec::<String>::new());
        assert!(filter.fields.is_empty());
        assert!(filter.matches(&login_task()));
    }

    #[test]
    fn test_nested_field_filter() {
        let task = login_task().with_assignee(Assignee::new("Ada"));
        assert!(TaskFilter::new()
            .with_field("assignee.name", ["Ada"])
            .matches(&task));
        assert!(!TaskFilter::new()
            .with_field("assignee.name", ["Grace"])
            .matches(&task));
    }

    #[test]
    fn test_filter_tasks_keeps_board_order() {
        let board = board_with(&[("todo", &["a", "b"]), ("done", &["c"])]);
        let board = UpdateTask::new("c")
            .with_tags(["x"])
            .execute(&board)
            .unwrap();
        let board = UpdateTask::new("a")
            .with_tags(["x"])
            .execute(&board)
            .unwrap();

        let found = filter_tasks(&board, &TaskFilter::new().with_tags(["x"]));
        let ids: Vec<_> = found.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
