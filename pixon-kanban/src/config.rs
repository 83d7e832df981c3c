//! Engine configuration.
//!
//! Settings are stacked with figment, lowest priority first:
//!
//! 1. built-in defaults ([`EngineConfig::default`])
//! 2. an optional YAML file
//! 3. `PIXON_KANBAN_*` environment variables, e.g. `PIXON_KANBAN_TIMER_TICK_SECS=5`

use crate::error::{KanbanError, Result};
use crate::types::{Board, Column};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PIXON_KANBAN_";

/// A column created on new boards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// WIP limit; 0 or absent means unlimited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ColumnConfig {
    fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            color: None,
            limit: None,
        }
    }
}

impl From<&ColumnConfig> for Column {
    fn from(config: &ColumnConfig) -> Self {
        let mut column = Column::new(config.id.as_str(), config.title.clone());
        if let Some(color) = &config.color {
            column = column.with_color(color.clone());
        }
        if let Some(limit) = config.limit {
            column = column.with_limit(limit);
        }
        column
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Columns of a freshly created board, left to right
    pub default_columns: Vec<ColumnConfig>,
    /// Whole seconds between timer ticks; each tick credits this many seconds
    pub timer_tick_secs: u64,
    /// Display label of the bucket holding tasks with no group value
    pub ungrouped_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_columns: vec![
                ColumnConfig::new("todo", "To Do"),
                ColumnConfig::new("in-progress", "In Progress"),
                ColumnConfig::new("done", "Done"),
            ],
            timer_tick_secs: 1,
            ungrouped_label: "Ungrouped".to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by the environment
    pub fn load() -> Result<Self> {
        Self::finalize(Self::load_env_vars(Self::build_figment()))
    }

    /// Defaults, then the YAML file at `path` (skipped if missing), then the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading engine config");
        let figment = Self::build_figment().merge(Yaml::file(path));
        Self::finalize(Self::load_env_vars(figment))
    }

    /// Extract and validate a config from an arbitrary figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        Self::finalize(figment)
    }

    /// The defaults as a figment, for callers stacking their own providers
    pub fn build_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Self::default()))
    }

    fn load_env_vars(figment: Figment) -> Figment {
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    fn finalize(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timer_tick_secs == 0 {
            return Err(KanbanError::invalid_value(
                "timer_tick_secs",
                "must be at least one second",
            ));
        }
        if self.default_columns.is_empty() {
            return Err(KanbanError::invalid_value(
                "default_columns",
                "at least one column is required",
            ));
        }
        Ok(())
    }

    /// The configured default columns
    pub fn columns(&self) -> Vec<Column> {
        self.default_columns.iter().map(Column::from).collect()
    }

    /// A new, empty board laid out with the default columns
    pub fn board(&self, name: impl Into<String>) -> Result<Board> {
        Board::with_columns(name, self.columns())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.timer_tick_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), Duration::from_secs(1));

        let board = config.board("Sprint").unwrap();
        let titles: Vec<_> = board
            .column_order()
            .iter()
            .map(|id| board.column(id).unwrap().title.clone())
            .collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    }

    #[test]
    #[serial]
    fn test_yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "timer_tick_secs: 5\ndefault_columns:\n  - id: backlog\n    title: Backlog\n  - id: doing\n    title: Doing\n    color: \"#ff8800\"\n    limit: 3\n"
        )
        .unwrap();

        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(config.timer_tick_secs, 5);
        assert_eq!(config.ungrouped_label, "Ungrouped");

        let columns = config.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].limit.map(|l| l.get()), Some(3));
        assert_eq!(columns[1].color.as_deref(), Some("#ff8800"));
    }

    #[test]
    #[serial]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load_from(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config.default_columns.len(), 3);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let figment = EngineConfig::build_figment().merge(Yaml::string("timer_tick_secs: 0"));
        let result = EngineConfig::from_figment(figment);
        assert!(matches!(result, Err(KanbanError::InvalidValue { .. })));
    }

    #[test]
    fn test_malformed_value_is_config_error() {
        let figment =
            EngineConfig::build_figment().merge(Yaml::string("timer_tick_secs: soon"));
        let result = EngineConfig::from_figment(figment);
        assert!(matches!(result, Err(KanbanError::Config(_))));
    }

    #[test]
    fn test_duplicate_default_columns_rejected() {
        let yaml = serde_yaml_ng::to_string(&EngineConfig {
            default_columns: vec![
                ColumnConfig::new("a", "A"),
                ColumnConfig::new("a", "Again"),
            ],
            ..Default::default()
        })
        .unwrap();
        let config =
            EngineConfig::from_figment(EngineConfig::build_figment().merge(Yaml::string(&yaml)))
                .unwrap();
        assert!(matches!(
            config.board("b"),
            Err(KanbanError::DuplicateId { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timer_tick_secs: 5\nungrouped_label: None").unwrap();

        std::env::set_var("PIXON_KANBAN_TIMER_TICK_SECS", "30");
        let result = EngineConfig::load_from(file.path());
        std::env::remove_var("PIXON_KANBAN_TIMER_TICK_SECS");

        let config = result.unwrap();
        assert_eq!(config.timer_tick_secs, 30);
        assert_eq!(config.ungrouped_label, "None");
    }

    #[test]
    #[serial]
    fn test_load_without_env_is_default() {
        let config = EngineConfig::load().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_zero_limit_means_unlimited() {
        let column = Column::from(&ColumnConfig {
            limit: Some(0),
            ..ColumnConfig::new("x", "X")
        });
        assert!(column.limit.is_none());
    }
}
