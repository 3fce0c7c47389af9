//! Tokio runtime hosting the refresh scheduler.
//!
//! The dashboard's render loop is synchronous; this wrapper owns a
//! single-worker runtime so that every timer tick, request completion and
//! state write happens on one event loop while the UI thread only reads.

use std::time::Duration;

use tokio::sync::watch;

use super::client::SolarDataSource;
use super::scheduler::{RefreshScheduler, SchedulerConfig, SchedulerHandle, ViewState};

/// How long shutdown waits for in-flight requests before abandoning them
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub struct DashboardRuntime {
    /// Receiver for view state updates
    pub state_rx: watch::Receiver<ViewState>,

    handle: Option<SchedulerHandle>,

    runtime: tokio::runtime::Runtime,
}

impl DashboardRuntime {
    /// Build the runtime and start refreshing immediately.
    pub fn start<S: SolarDataSource>(source: S, config: SchedulerConfig) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .thread_name("solar-refresh")
            .build()?;

        let handle = {
            let _guard = runtime.enter();
            RefreshScheduler::new(source, config).start()
        };

        Ok(Self {
            state_rx: handle.state(),
            handle: Some(handle),
            runtime,
        })
    }

    pub fn refresh_now(&self) -> bool {
        self.handle
            .as_ref()
            .map(SchedulerHandle::refresh_now)
            .unwrap_or(false)
    }

    /// Cancel the scheduler, then tear the runtime down.
    pub fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            self.runtime.block_on(handle.cancel());
        }
        self.runtime.shutdown_timeout(SHUTDOWN_GRACE);
    }
}
