use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::errors::CoreError;
use crate::models::dashboard::DashboardState;
use crate::EarningsTracker;

/// Upper bound on how long `stop` waits for an in-flight cycle.
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Requests from the presentation layer to the polling task.
#[derive(Debug, Clone, PartialEq)]
pub enum PollCommand {
    RefreshNow,
    ChangeCurrency(String),
    ToggleDarkMode,
    Stop,
}

/// Notifications from the polling task.
#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// A cycle is starting; carries the state before the fetch.
    Loading(DashboardState),
    /// State after a cycle or a preference change.
    Updated(DashboardState),
    /// A command was refused (e.g. unsupported currency).
    Rejected(String),
    Stopped,
}

struct TaskState {
    tracker: EarningsTracker,
    interval: Duration,
    cmd_rx: mpsc::Receiver<PollCommand>,
    event_tx: mpsc::Sender<PollEvent>,
    latest_tx: watch::Sender<DashboardState>,
}

impl TaskState {
    fn emit(&self, event: PollEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => match event {
                PollEvent::Loading(_) => log::debug!("Event queue full; dropping Loading"),
                PollEvent::Updated(_) => {
                    log::warn!("Event queue full; dropping Updated (latest state still published)")
                }
                other => log::warn!("Event queue full; dropping {other:?}"),
            },
            Err(mpsc::error::TrySendError::Closed(_)) => {
                log::debug!("Event receiver gone; dropping event")
            }
        }
    }

    /// Publish the tracker state, then notify listeners.
    fn publish(&self) {
        let state = self.tracker.state().clone();
        self.latest_tx.send_replace(state.clone());
        self.emit(PollEvent::Updated(state));
    }

    async fn cycle(&mut self) {
        self.emit(PollEvent::Loading(self.tracker.state().clone()));
        self.latest_tx.send_replace(self.tracker.state().clone());
        self.tracker.refresh().await;
        self.publish();
    }
}

/// Periodic refresh of an [`EarningsTracker`] on a background tokio task.
///
/// The first cycle runs immediately, then once per interval. A currency
/// change runs a cycle at once and restarts the interval. Cycles never
/// overlap: ticks that fall due during a slow fetch are delayed.
pub struct PricePoller;

impl PricePoller {
    /// Spawn the polling task. Must be called inside a tokio runtime.
    pub fn spawn(tracker: EarningsTracker, interval: Duration) -> PollerHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::channel(64);
        let (latest_tx, latest_rx) = watch::channel(tracker.state().clone());

        let state = TaskState {
            tracker,
            interval,
            cmd_rx,
            event_tx,
            latest_tx,
        };

        log::info!("Starting price poller (every {}s)", interval.as_secs());
        let handle = tokio::spawn(run_task(state));

        PollerHandle {
            cmd_tx,
            event_rx,
            latest_rx,
            task_handle: Some(handle),
        }
    }

    /// Spawn with the interval from the tracker's settings.
    pub fn spawn_with_settings(tracker: EarningsTracker) -> PollerHandle {
        let interval = Duration::from_secs(tracker.settings().poll_interval_secs);
        Self::spawn(tracker, interval)
    }
}

/// Owner-side handle of a running poller.
///
/// Dropping the handle aborts the task; `stop` shuts it down gracefully and
/// hands the tracker back.
pub struct PollerHandle {
    cmd_tx: mpsc::Sender<PollCommand>,
    event_rx: mpsc::Receiver<PollEvent>,
    latest_rx: watch::Receiver<DashboardState>,
    task_handle: Option<JoinHandle<EarningsTracker>>,
}

impl PollerHandle {
    fn send(&self, cmd: PollCommand) -> Result<(), CoreError> {
        self.cmd_tx.try_send(cmd).map_err(|e| match e {
            mpsc::error::TrySendError::Full(cmd) => {
                log::warn!("Poller command queue full; dropping {cmd:?}");
                CoreError::PollerBusy
            }
            mpsc::error::TrySendError::Closed(_) => CoreError::PollerStopped,
        })
    }

    pub fn refresh_now(&self) -> Result<(), CoreError> {
        self.send(PollCommand::RefreshNow)
    }

    pub fn change_currency(&self, currency: impl Into<String>) -> Result<(), CoreError> {
        self.send(PollCommand::ChangeCurrency(currency.into()))
    }

    pub fn toggle_dark_mode(&self) -> Result<(), CoreError> {
        self.send(PollCommand::ToggleDarkMode)
    }

    /// Wait for the next event. `None` once the task has exited and all
    /// events have been drained.
    pub async fn next_event(&mut self) -> Option<PollEvent> {
        self.event_rx.recv().await
    }

    /// Most recent dashboard state, even if events were dropped.
    pub fn latest(&self) -> DashboardState {
        self.latest_rx.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop polling and wait for the task to finish.
    ///
    /// Returns the tracker, or `None` if the task did not finish within the
    /// stop timeout (it is then aborted) or had already panicked.
    pub async fn stop(mut self) -> Option<EarningsTracker> {
        let _ = self.cmd_tx.send(PollCommand::Stop).await;
        let mut handle = self.task_handle.take()?;

        match tokio::time::timeout(STOP_TIMEOUT, &mut handle).await {
            Ok(Ok(tracker)) => Some(tracker),
            Ok(Err(e)) => {
                log::error!("Price poller task failed: {e}");
                None
            }
            Err(_) => {
                log::warn!("Price poller did not stop in time; aborting");
                handle.abort();
                None
            }
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) -> EarningsTracker {
    let mut ticker = tokio::time::interval(state.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // The first tick completes immediately.
            _ = ticker.tick() => state.cycle().await,

            cmd = state.cmd_rx.recv() => match cmd {
                Some(PollCommand::RefreshNow) => state.cycle().await,
                Some(PollCommand::ChangeCurrency(currency)) => {
                    match state.tracker.select_currency(&currency) {
                        Ok(()) => {
                            state.cycle().await;
                            ticker.reset();
                        }
                        Err(e) => {
                            log::warn!("Currency change rejected: {e}");
                            state.emit(PollEvent::Rejected(e.user_message()));
                        }
                    }
                }
                Some(PollCommand::ToggleDarkMode) => {
                    if let Err(e) = state.tracker.toggle_dark_mode() {
                        log::error!("Failed to persist dark mode: {e}");
                    }
                    state.publish();
                }
                Some(PollCommand::Stop) | None => break,
            },
        }
    }

    log::info!("Price poller stopped");
    state.emit(PollEvent::Stopped);
    state.tracker
}
