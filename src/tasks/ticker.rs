//! Countdown tick background task

use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::state::{AppState, Run};

/// Fixed period between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the task ticking one countdown run. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle(JoinHandle<()>);

impl TickHandle {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self(handle)
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Spawn the tick task for `run`
pub fn spawn_ticker(state: Arc<AppState>, run: Run) -> TickHandle {
    TickHandle::new(tokio::spawn(countdown_tick_task(state, run)))
}

/// Tick the countdown for `run` once per [`TICK_PERIOD`] until the run is
/// paused, replaced or completes.
pub async fn countdown_tick_task(state: Arc<AppState>, run: Run) {
    debug!("Starting tick task for {} (epoch {})", run.mode, run.epoch);

    // The first tick is one full period after the start
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

    loop {
        interval.tick().await;

        match state.scheduled_tick(run.mode, run.epoch) {
            Ok(true) => {}
            Ok(false) => {
                debug!("Tick task for {} (epoch {}) finished", run.mode, run.epoch);
                break;
            }
            Err(e) => {
                error!("Failed to tick {} countdown: {}", run.mode, e);
                break;
            }
        }
    }
}
