// Refresh scheduler behavior under paused tokio time

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use solar_guardian::core::solar::{
    FailurePolicy, RefreshScheduler, SchedulerConfig, SolarDataSource, SolarSnapshot, ViewState,
};
use solar_guardian::error::Result;
use solar_guardian::SolarError;
use tokio::sync::broadcast::error::RecvError;

fn snapshot(tag: &str) -> SolarSnapshot {
    SolarSnapshot {
        flares: vec![],
        geomagnetic: vec![],
        last_updated: tag.to_string(),
        alerts: vec![],
    }
}

struct DelayedSource {
    steps: Mutex<VecDeque<(Duration, Result<SolarSnapshot>)>>,
}

impl DelayedSource {
    fn new(steps: Vec<(Duration, Result<SolarSnapshot>)>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
        }
    }

    fn pop(&self) -> Option<(Duration, Result<SolarSnapshot>)> {
        self.steps.lock().unwrap().pop_front()
    }
}

impl SolarDataSource for DelayedSource {
    async fn fetch(&self) -> Result<SolarSnapshot> {
        let (delay, outcome) = self
            .pop()
            .unwrap_or((Duration::ZERO, Err(SolarError::network("no more responses"))));
        tokio::time::sleep(delay).await;
        outcome
    }
}

fn config(secs: u64, failure_policy: FailurePolicy) -> SchedulerConfig {
    SchedulerConfig {
        interval: Duration::from_secs(secs),
        failure_policy,
    }
}

async fn drain(rx: &mut tokio::sync::broadcast::Receiver<ViewState>) -> Vec<ViewState> {
    let mut seen = Vec::new();
    loop {
        match rx.recv().await {
            Ok(state) => seen.push(state),
            Err(RecvError::Closed) => return seen,
            Err(RecvError::Lagged(n)) => panic!("lagged by {}", n),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_cannot_overwrite_newer_one() {
    // #1 issued at t=0 lands at t=45, #2 issued at t=30 lands at t=35
    let source = DelayedSource::new(vec![
        (Duration::from_secs(45), Ok(snapshot("A"))),
        (Duration::from_secs(5), Ok(snapshot("B"))),
    ]);
    let scheduler = RefreshScheduler::new(source, config(30, FailurePolicy::DiscardSnapshot));
    let mut transitions = scheduler.subscribe();
    let handle = scheduler.start();

    tokio::time::sleep(Duration::from_secs(50)).await;

    let current = handle.current();
    assert_eq!(current.snapshot().unwrap().last_updated, "B");

    handle.cancel().await;

    let seen = drain(&mut transitions).await;
    let names: Vec<_> = seen.iter().map(ViewState::name).collect();
    assert_eq!(names, vec!["loading", "loading", "ready"]);
    assert!(seen
        .iter()
        .filter_map(ViewState::snapshot)
        .all(|snap| snap.last_updated != "A"));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_in_flight_result() {
    let source = DelayedSource::new(vec![(Duration::from_secs(10), Ok(snapshot("late")))]);
    let scheduler = RefreshScheduler::new(source, config(30, FailurePolicy::DiscardSnapshot));
    let mut transitions = scheduler.subscribe();
    let handle = scheduler.start();
    let state = handle.state();

    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.cancel().await;
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(*state.borrow(), ViewState::Loading);
    let seen = drain(&mut transitions).await;
    assert_eq!(seen, vec![ViewState::Loading]);
}

#[tokio::test(start_paused = true)]
async fn test_retain_policy_keeps_last_good_snapshot() {
    let source = DelayedSource::new(vec![
        (Duration::from_millis(100), Ok(snapshot("good"))),
        (
            Duration::from_millis(100),
            Err(SolarError::server(500, "Internal Server Error")),
        ),
    ]);
    let scheduler = RefreshScheduler::new(source, config(30, FailurePolicy::RetainLastSnapshot));
    let handle = scheduler.start();
    let mut state = handle.state();

    let failed = state
        .wait_for(|s| matches!(s, ViewState::Failed { .. }))
        .await
        .unwrap()
        .clone();
    handle.cancel().await;

    match failed {
        ViewState::Failed { reason, retained } => {
            assert!(reason.contains("500"));
            assert_eq!(retained.unwrap().last_updated, "good");
        }
        other => panic!("unexpected state {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_discard_policy_clears_snapshot_on_failure() {
    let source = DelayedSource::new(vec![
        (Duration::ZERO, Ok(snapshot("good"))),
        (Duration::ZERO, Err(SolarError::network("connection failed"))),
    ]);
    let scheduler = RefreshScheduler::new(source, config(30, FailurePolicy::DiscardSnapshot));
    let handle = scheduler.start();
    let mut state = handle.state();

    let failed = state
        .wait_for(|s| matches!(s, ViewState::Failed { .. }))
        .await
        .unwrap()
        .clone();
    handle.cancel().await;

    assert!(failed.snapshot().is_none());
    assert!(matches!(failed, ViewState::Failed { retained: None, .. }));
}
