//! Per-task time tracking.
//!
//! [`ActiveTimer`] is plain state: which task (if any) is being timed, plus
//! a generation counter that changes whenever that answer changes. Every
//! [`Tick`] carries the generation it was produced for, and ticks from an
//! older generation are ignored. Switching the timer from one task to
//! another therefore never credits the previous task, even if a tick was
//! already in flight.
//!
//! [`TimerDriver`] produces ticks on a tokio interval and restarts itself
//! whenever the generation changes.

use crate::operation::Execute;
use crate::task::RecordTime;
use crate::types::{Board, TaskId};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// One elapsed interval for a specific timer generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub task: TaskId,
    pub generation: u64,
    pub seconds: u64,
}

/// The single active timer of a board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTimer {
    task: Option<TaskId>,
    generation: u64,
}

impl ActiveTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The task currently being timed
    pub fn active(&self) -> Option<&TaskId> {
        self.task.as_ref()
    }

    /// Changes every time the active task changes
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running_for(&self, id: &TaskId) -> bool {
        self.task.as_ref() == Some(id)
    }

    /// Start timing `id`, stopping any other task. Returns false if `id` was
    /// already the active task.
    pub fn start(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        if self.is_running_for(&id) {
            return false;
        }
        debug!(task = %id, previous = ?self.task, "timer started");
        self.task = Some(id);
        self.generation += 1;
        true
    }

    /// Stop the timer, returning the task that was being timed
    pub fn stop(&mut self) -> Option<TaskId> {
        let stopped = self.task.take();
        if let Some(id) = &stopped {
            debug!(task = %id, "timer stopped");
            self.generation += 1;
        }
        stopped
    }

    /// Start timing `id`, or stop if it is already active.
    /// Returns whether `id` is being timed afterwards.
    pub fn toggle(&mut self, id: impl Into<TaskId>) -> bool {
        let id = id.into();
        if self.is_running_for(&id) {
            self.stop();
            false
        } else {
            self.start(id)
        }
    }

    /// Set the active task directly
    pub fn set(&mut self, id: Option<TaskId>) {
        match id {
            Some(id) => {
                self.start(id);
            }
            None => {
                self.stop();
            }
        }
    }

    /// A tick for the current generation, for hosts that drive time themselves
    pub fn tick(&self, seconds: u64) -> Option<Tick> {
        Some(Tick {
            task: self.task.clone()?,
            generation: self.generation,
            seconds,
        })
    }

    /// Credit a tick to the board.
    ///
    /// Returns `None` when the tick is stale (older generation, or not for the
    /// active task) or the task no longer exists.
    pub fn apply_tick(&self, board: &Board, tick: &Tick) -> Option<Board> {
        if tick.generation != self.generation || !self.is_running_for(&tick.task) {
            trace!(task = %tick.task, generation = tick.generation, "ignoring stale tick");
            return None;
        }
        RecordTime::new(tick.task.clone(), tick.seconds)
            .execute(board)
            .ok()
    }
}

struct RunningTicker {
    generation: u64,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Produces [`Tick`]s for the active timer on a tokio interval.
///
/// Call [`TimerDriver::sync`] after every change to the [`ActiveTimer`]; it
/// cancels the ticker of the previous generation and starts a new one if a
/// task is active. Dropping the driver cancels any running ticker.
///
/// The period is whole seconds so each tick credits exactly the time that
/// elapsed.
pub struct TimerDriver {
    period: Duration,
    sender: mpsc::UnboundedSender<Tick>,
    running: Option<RunningTicker>,
}

impl TimerDriver {
    /// Create a driver ticking every `period`, plus the receiver ticks arrive on.
    ///
    /// `period` is rounded down to whole seconds, with a minimum of one.
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let driver = Self {
            period: Duration::from_secs(period.as_secs().max(1)),
            sender,
            running: None,
        };
        (driver, receiver)
    }

    /// Time between ticks
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Seconds credited per tick; always equal to the period
    pub fn seconds_per_tick(&self) -> u64 {
        self.period.as_secs()
    }

    /// True while a ticker task is alive
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    /// Bring the ticker in line with the timer state. Must be called from
    /// within a tokio runtime.
    pub fn sync(&mut self, timer: &ActiveTimer) {
        if self
            .running
            .as_ref()
            .is_some_and(|r| r.generation == timer.generation())
        {
            return;
        }
        self.stop();

        let Some(tick) = timer.tick(self.seconds_per_tick()) else {
            return;
        };
        let token = CancellationToken::new();
        let generation = tick.generation;
        let handle = tokio::spawn(run_ticker(
            self.period,
            tick,
            token.clone(),
            self.sender.clone(),
        ));
        self.running = Some(RunningTicker {
            generation,
            token,
            handle,
        });
    }

    /// Cancel the running ticker, if any
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
        }
    }
}

impl fmt::Debug for TimerDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerDriver")
            .field("period", &self.period)
            .field("generation", &self.running.as_ref().map(|r| r.generation))
            .finish()
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticker(
    period: Duration,
    tick: Tick,
    token: CancellationToken,
    sender: mpsc::UnboundedSender<Tick>,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                if sender.send(tick.clone()).is_err() {
                    break;
                }
            }
        }
    }
    trace!(task = %tick.task, generation = tick.generation, "ticker finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::board_with;

    fn spent(board: &Board, id: &str) -> u64 {
        board.task(&id.into()).unwrap().time_spent
    }

    #[test]
    fn test_start_stop_toggle() {
        let mut timer = ActiveTimer::new();
        assert!(timer.active().is_none());
        assert!(timer.tick(1).is_none());

        assert!(timer.start("a"));
        assert!(!timer.start("a"));
        assert_eq!(timer.generation(), 1);

        assert!(timer.toggle("b"));
        assert!(timer.is_running_for(&"b".into()));
        assert!(!timer.toggle("b"));
        assert!(timer.active().is_none());
        assert_eq!(timer.generation(), 3);

        timer.set(Some("c".into()));
        assert_eq!(timer.active().map(|t| t.as_str()), Some("c"));
        timer.set(None);
        assert!(timer.active().is_none());
    }

    #[test]
    fn test_apply_tick_credits_active_task() {
        let board = board_with(&[("x", &["a", "b"])]);
        let mut timer = ActiveTimer::new();
        timer.start("a");

        let tick = timer.tick(1).unwrap();
        let board = timer.apply_tick(&board, &tick).unwrap();
        let board = timer.apply_tick(&board, &tick).unwrap();

        assert_eq!(spent(&board, "a"), 2);
        assert_eq!(spent(&board, "b"), 0);
    }

    #[test]
    fn test_swap_does_not_double_count() {
        let board = board_with(&[("x", &["a", "b"])]);
        let mut timer = ActiveTimer::new();
        timer.start("a");
        let in_flight = timer.tick(1).unwrap();

        timer.start("b");

        // The tick produced for "a" before the swap is stale now
        assert!(timer.apply_tick(&board, &in_flight).is_none());

        let board = timer
            .apply_tick(&board, &timer.tick(1).unwrap())
            .unwrap();
        assert_eq!(spent(&board, "a"), 0);
        assert_eq!(spent(&board, "b"), 1);
    }

    #[test]
    fn test_tick_for_removed_task() {
        let board = board_with(&[("x", &[])]);
        let mut timer = ActiveTimer::new();
        timer.start("gone");
        assert!(timer.apply_tick(&board, &timer.tick(1).unwrap()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_ticks_each_period() {
        let mut timer = ActiveTimer::new();
        timer.start("a");
        let (mut driver, mut ticks) = TimerDriver::new(Duration::from_secs(1));
        driver.sync(&timer);
        assert!(driver.is_running());

        let first = ticks.recv().await.unwrap();
        let second = ticks.recv().await.unwrap();
        assert_eq!(first.task.as_str(), "a");
        assert_eq!(first.seconds, 1);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fractional_period_rounds_down() {
        let (mut driver, mut ticks) = TimerDriver::new(Duration::from_millis(2500));
        assert_eq!(driver.period(), Duration::from_secs(2));
        assert_eq!(driver.seconds_per_tick(), 2);

        let mut timer = ActiveTimer::new();
        timer.start("a");
        let started = Instant::now();
        driver.sync(&timer);

        let tick = ticks.recv().await.unwrap();
        assert_eq!(tick.seconds, 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));

        let (short, _) = TimerDriver::new(Duration::from_millis(300));
        assert_eq!(short.seconds_per_tick(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_restarts_on_swap() {
        let mut timer = ActiveTimer::new();
        timer.start("a");
        let (mut driver, mut ticks) = TimerDriver::new(Duration::from_secs(1));
        driver.sync(&timer);
        assert_eq!(ticks.recv().await.unwrap().task.as_str(), "a");

        timer.start("b");
        driver.sync(&timer);

        let next = ticks.recv().await.unwrap();
        assert_eq!(next.task.as_str(), "b");
        assert_eq!(next.generation, timer.generation());
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_stops_when_timer_stops() {
        let mut timer = ActiveTimer::new();
        timer.start("a");
        let (mut driver, mut ticks) = TimerDriver::new(Duration::from_secs(1));
        driver.sync(&timer);

        timer.stop();
        driver.sync(&timer);
        assert!(!driver.is_running());

        drop(driver);
        // Sender side is gone once the driver and its ticker are dropped
        assert!(ticks.recv().await.is_none());
    }
}
