//! A board together with the transient state a UI keeps around it.
//!
//! [`BoardSession`] is the single entry point a host drives: commands,
//! filters, grouping, selection and the active timer all go through it, and
//! it keeps them consistent with each other after every change.
//!
//! A session can own a [`TimerDriver`]. Once attached, every change to the
//! active timer (including the timed task being removed) restarts or cancels
//! the driver's ticker immediately.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::operation::Execute;
use crate::selection::Selection;
use crate::timer::{ActiveTimer, Tick, TimerDriver};
use crate::types::{Board, ColumnId, Task, TaskId};
use crate::view::{GroupKey, TaskGroup, ViewSettings};
use std::borrow::Cow;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct BoardSession {
    board: Board,
    selection: Selection,
    timer: ActiveTimer,
    driver: Option<TimerDriver>,
    view: ViewSettings,
    ungrouped_label: String,
    tick_period: Duration,
}

impl BoardSession {
    /// Wrap an existing board with default settings
    pub fn new(board: Board) -> Self {
        let defaults = EngineConfig::default();
        let tick_period = defaults.tick_period();
        Self {
            board,
            selection: Selection::new(),
            timer: ActiveTimer::new(),
            driver: None,
            view: ViewSettings::default(),
            ungrouped_label: defaults.ungrouped_label,
            tick_period,
        }
    }

    /// Start a fresh board laid out from `config`
    pub fn from_config(name: impl Into<String>, config: &EngineConfig) -> Result<Self> {
        let board = config.board(name)?;
        info!(board = %board.name(), columns = board.column_order().len(), "session created");
        Ok(Self {
            ungrouped_label: config.ungrouped_label.clone(),
            tick_period: config.tick_period(),
            ..Self::new(board)
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Swap in a different board, e.g. one loaded from disk
    pub fn set_board(&mut self, board: Board) {
        self.replace_board(board);
    }

    /// Apply a command. On rejection the board is untouched and the reason
    /// is returned.
    pub fn apply<O: Execute + ?Sized>(&mut self, op: &O) -> Result<()> {
        let board = self.board.apply(op).into_result()?;
        self.replace_board(board);
        Ok(())
    }

    fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.selection.prune(&self.board);
        if self
            .timer
            .active()
            .is_some_and(|id| !self.board.has_task(id))
        {
            debug!("active task is gone, stopping timer");
            self.timer.stop();
            self.sync_driver();
        }
    }

    // Views

    pub fn view(&self) -> &ViewSettings {
        &self.view
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.view.filter.query = query.into();
    }

    /// Accept only tasks whose value at `path` is in `values`; empty clears it
    pub fn set_field_filter<I, S>(&mut self, path: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view.filter.set_field(path, values);
    }

    pub fn clear_filters(&mut self) {
        self.view.filter.clear();
    }

    /// Group visible tasks by a field path; `None` or blank for one flat group
    pub fn set_group_by(&mut self, path: Option<impl Into<String>>) {
        self.view.group_by = path.map(Into::into);
    }

    /// Tasks passing the current filters, in board order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.view.visible(&self.board)
    }

    pub fn groups(&self) -> Vec<TaskGroup<'_>> {
        self.view.groups(&self.board)
    }

    /// Display label for a group, honoring the configured ungrouped label
    pub fn group_label<'a>(&'a self, key: &'a GroupKey) -> Cow<'a, str> {
        key.label(&self.ungrouped_label)
    }

    // Selection

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggle a task in the selection. Unknown tasks are never selected.
    pub fn toggle_selected(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        if !self.board.has_task(&id) {
            return false;
        }
        self.selection.toggle(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected task
    pub fn delete_selected(&mut self) {
        let board = self.selection.remove_selected(&self.board);
        self.replace_board(board);
    }

    /// Append every selected task to `column`
    pub fn move_selected(&mut self, column: &ColumnId) {
        let board = self.selection.move_selected(&self.board, column);
        self.replace_board(board);
    }

    // Timer

    pub fn active_timer(&self) -> &ActiveTimer {
        &self.timer
    }

    /// Seconds between ticks a driver should use for this session
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Attach a [`TimerDriver`] ticking at [`Self::tick_period`] and return the
    /// receiver its ticks arrive on. Feed them back through [`Self::tick`].
    ///
    /// Replaces (and cancels) any previously attached driver. Must be called
    /// from within a tokio runtime, as must every timer change afterwards.
    pub fn attach_timer_driver(&mut self) -> mpsc::UnboundedReceiver<Tick> {
        let (driver, ticks) = TimerDriver::new(self.tick_period);
        self.driver = Some(driver);
        self.sync_driver();
        ticks
    }

    /// Detach and cancel the owned driver, if any
    pub fn detach_timer_driver(&mut self) {
        self.driver = None;
    }

    pub fn timer_driver(&self) -> Option<&TimerDriver> {
        self.driver.as_ref()
    }

    fn sync_driver(&mut self) {
        if let Some(driver) = self.driver.as_mut() {
            driver.sync(&self.timer);
        }
    }

    /// Start timing a task, or stop with `None`. Unknown tasks stop the timer.
    pub fn set_active_timer(&mut self, id: Option<TaskId>) {
        match id {
            Some(id) if self.board.has_task(&id) => {
                self.timer.start(id);
            }
            _ => {
                self.timer.stop();
            }
        }
        self.sync_driver();
    }

    /// Start or stop timing a task. Returns whether it is being timed afterwards.
    pub fn toggle_timer(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        if !self.board.has_task(&id) {
            return false;
        }
        let running = self.timer.toggle(id);
        self.sync_driver();
        running
    }

    /// Credit a tick. Returns false for stale ticks.
    pub fn tick(&mut self, tick: &Tick) -> bool {
        match self.timer.apply_tick(&self.board, tick) {
            Some(board) => {
                self.board = board;
                true
            }
            None => false,
        }
    }
}
