//! Timer driver feeding a session, on a paused tokio clock

use pixon_kanban::task::RemoveTask;
use pixon_kanban::test_support::board_with;
use pixon_kanban::{BoardSession, TimerDriver};
use std::time::Duration;

fn spent(session: &BoardSession, id: &str) -> u64 {
    session.board().task(&id.into()).unwrap().time_spent
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_driver_credits_only_active_task() {
    let mut session = BoardSession::new(board_with(&[("todo", &["a", "b"])]));
    let (mut driver, mut ticks) = TimerDriver::new(session.tick_period());

    session.set_active_timer(Some("a".into()));
    driver.sync(session.active_timer());

    for _ in 0..3 {
        let tick = ticks.recv().await.unwrap();
        assert!(session.tick(&tick));
    }
    assert_eq!(spent(&session, "a"), 3);

    // Swap while a tick for "a" may still be queued
    tokio::time::advance(Duration::from_millis(1500)).await;
    session.toggle_timer("b");
    driver.sync(session.active_timer());

    let mut received = 0;
    while spent(&session, "b") < 2 {
        let tick = ticks.recv().await.unwrap();
        session.tick(&tick);
        received += 1;
        assert!(received < 10, "timer for b never advanced");
    }

    assert_eq!(spent(&session, "a"), 3);
    assert_eq!(spent(&session, "b"), 2);
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_removing_timed_task_stops_timer() {
    let mut session = BoardSession::new(board_with(&[("todo", &["a"])]));
    let mut ticks = session.attach_timer_driver();

    session.set_active_timer(Some("a".into()));
    assert!(session.timer_driver().unwrap().is_running());
    let pending = ticks.recv().await.unwrap();

    session.apply(&RemoveTask::new("a")).unwrap();
    assert!(session.active_timer().active().is_none());
    assert!(!session.timer_driver().unwrap().is_running());
    assert!(!session.tick(&pending));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_attached_driver_follows_toggles() {
    let mut session = BoardSession::new(board_with(&[("todo", &["a", "b"])]));
    let mut ticks = session.attach_timer_driver();
    assert!(!session.timer_driver().unwrap().is_running());

    session.toggle_timer("a");
    let tick = ticks.recv().await.unwrap();
    assert!(session.tick(&tick));

    session.toggle_timer("b");
    let tick = ticks.recv().await.unwrap();
    assert_eq!(tick.task.as_str(), "b");
    assert!(session.tick(&tick));

    session.toggle_timer("b");
    assert!(!session.timer_driver().unwrap().is_running());
    assert_eq!(spent(&session, "a"), 1);
    assert_eq!(spent(&session, "b"), 1);
}
