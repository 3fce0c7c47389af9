//! Periodic refresh and the dashboard view state machine.
//!
//! [`RefreshMachine`] holds the state transitions and the request sequence
//! guard and performs no I/O. [`RefreshScheduler`] drives it from a tokio
//! task: a fixed-interval ticker issues fetches, every fetch runs in its own
//! task and reports back to the loop, and the loop is the only writer of the
//! published state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::client::SolarDataSource;
use super::model::SolarSnapshot;
use crate::error::Result;

/// Default refresh cadence
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Buffered transitions per observer before it starts lagging
const TRANSITION_BUFFER: usize = 64;

/// What happens to the last good snapshot when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Show only the error; the previous snapshot is dropped.
    #[default]
    DiscardSnapshot,
    /// Keep the last `Ready` snapshot available underneath the error.
    RetainLastSnapshot,
}

/// Visible dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Ready(Arc<SolarSnapshot>),
    Failed {
        reason: String,
        /// Only populated under [`FailurePolicy::RetainLastSnapshot`]
        retained: Option<Arc<SolarSnapshot>>,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Failed { .. } => "failed",
        }
    }

    /// Snapshot of a `Ready` state.
    pub fn snapshot(&self) -> Option<&Arc<SolarSnapshot>> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// True once a fetch has resolved (success or failure).
    pub fn is_settled(&self) -> bool {
        matches!(self, ViewState::Ready(_) | ViewState::Failed { .. })
    }
}

/// Monotonic tag carried by every issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Transition logic with the stale-response guard.
#[derive(Debug)]
pub struct RefreshMachine {
    state: ViewState,
    latest_issued: u64,
    last_good: Option<Arc<SolarSnapshot>>,
    policy: FailurePolicy,
    stopped: bool,
}

impl RefreshMachine {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            state: ViewState::Idle,
            latest_issued: 0,
            last_good: None,
            policy,
            stopped: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Issue a new request from any state and enter `Loading`.
    ///
    /// Returns `None` once stopped.
    pub fn begin_refresh(&mut self) -> Option<RequestId> {
        if self.stopped {
            return None;
        }
        self.latest_issued += 1;
        self.state = ViewState::Loading;
        Some(RequestId(self.latest_issued))
    }

    /// Apply the outcome of request `id`.
    ///
    /// Returns the new state when applied, `None` when the outcome was
    /// discarded because a newer request exists or the machine is stopped.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<SolarSnapshot>,
    ) -> Option<&ViewState> {
        if self.stopped || id.0 != self.latest_issued {
            return None;
        }

        self.state = match outcome {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.last_good = Some(Arc::clone(&snapshot));
                ViewState::Ready(snapshot)
            }
            Err(err) => {
                let retained = match self.policy {
                    FailurePolicy::DiscardSnapshot => {
                        self.last_good = None;
                        None
                    }
                    FailurePolicy::RetainLastSnapshot => self.last_good.clone(),
                };
                ViewState::Failed {
                    reason: err.to_string(),
                    retained,
                }
            }
        };

        Some(&self.state)
    }

    /// Refuse every further transition.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    pub interval: Duration,
    pub failure_policy: FailurePolicy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Not-yet-started scheduler. Subscribe here to observe every transition
/// from the very first `Loading`.
pub struct RefreshScheduler<S> {
    source: Arc<S>,
    config: SchedulerConfig,
    transitions_tx: broadcast::Sender<ViewState>,
}

impl<S: SolarDataSource> RefreshScheduler<S> {
    pub fn new(source: S, config: SchedulerConfig) -> Self {
        let (transitions_tx, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            source: Arc::new(source),
            config,
            transitions_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewState> {
        self.transitions_tx.subscribe()
    }

    /// Spawn the refresh loop on the current tokio runtime.
    ///
    /// The first fetch is issued immediately, then once per interval.
    pub fn start(self) -> SchedulerHandle {
        let (state_tx, state_rx) = watch::channel(ViewState::Idle);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        log::info!(
            "Starting refresh scheduler (interval: {}s, on failure: {:?})",
            self.config.interval.as_secs_f64(),
            self.config.failure_policy
        );

        let task = tokio::spawn(refresh_loop(
            self.source,
            self.config,
            state_tx,
            self.transitions_tx.clone(),
            refresh_rx,
            shutdown_rx,
        ));

        SchedulerHandle {
            state_rx,
            transitions_tx: self.transitions_tx,
            refresh_tx,
            shutdown_tx,
            task: Some(task),
        }
    }
}

/// Owner of a running scheduler.
///
/// Call [`SchedulerHandle::cancel`] on teardown. Dropping the handle without
/// cancelling aborts the loop task.
pub struct SchedulerHandle {
    state_rx: watch::Receiver<ViewState>,
    transitions_tx: broadcast::Sender<ViewState>,
    refresh_tx: mpsc::Sender<()>,
    shutdown_tx: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Receiver for the latest state.
    pub fn state(&self) -> watch::Receiver<ViewState> {
        self.state_rx.clone()
    }

    pub fn current(&self) -> ViewState {
        self.state_rx.borrow().clone()
    }

    /// Receiver for every applied transition from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewState> {
        self.transitions_tx.subscribe()
    }

    /// Request an out-of-cadence refresh. Returns false when one is
    /// already queued or the loop has exited.
    pub fn refresh_now(&self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }

    /// Stop the timer and wait for the loop to exit.
    ///
    /// Requests still in flight may finish but their results are dropped.
    pub async fn cancel(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    log::error!("Refresh loop ended abnormally: {}", e);
                }
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

type Completion = (RequestId, Result<SolarSnapshot>);

async fn refresh_loop<S: SolarDataSource>(
    source: Arc<S>,
    config: SchedulerConfig,
    state_tx: watch::Sender<ViewState>,
    transitions_tx: broadcast::Sender<ViewState>,
    mut refresh_rx: mpsc::Receiver<()>,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut machine = RefreshMachine::new(config.failure_policy);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let publish = |state: &ViewState| {
        state_tx.send_replace(state.clone());
        // No observers is fine
        let _ = transitions_tx.send(state.clone());
    };

    loop {
        tokio::select! {
            biased;

            _ = shutdown.recv() => {
                break;
            }
            Some((id, outcome)) = done_rx.recv() => {
                let failed = outcome.as_ref().err().map(|e| e.to_string());
                match machine.complete(id, outcome) {
                    Some(state) => {
                        match failed {
                            Some(reason) => log::warn!("Refresh #{} failed: {}", id.value(), reason),
                            None => log::info!("Refresh #{} succeeded", id.value()),
                        }
                        publish(state);
                    }
                    None => log::debug!("Discarding stale result of refresh #{}", id.value()),
                }
            }
            _ = ticker.tick() => {
                issue_fetch(&mut machine, &source, &done_tx, &publish);
            }
            Some(()) = refresh_rx.recv() => {
                log::debug!("Manual refresh requested");
                issue_fetch(&mut machine, &source, &done_tx, &publish);
                ticker.reset();
            }
        }
    }

    machine.stop();
    log::info!("Refresh scheduler stopped");
}

fn issue_fetch<S: SolarDataSource>(
    machine: &mut RefreshMachine,
    source: &Arc<S>,
    done_tx: &mpsc::UnboundedSender<Completion>,
    publish: &impl Fn(&ViewState),
) {
    let Some(id) = machine.begin_refresh() else {
        return;
    };
    log::debug!("Issuing refresh #{}", id.value());
    publish(machine.state());

    let source = Arc::clone(source);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let outcome = source.fetch().await;
        // The loop is gone after shutdown; the result is dropped with it
        let _ = done_tx.send((id, outcome));
    });
}
