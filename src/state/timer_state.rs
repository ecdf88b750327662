//! Countdown state for a single mode

use serde::{Deserialize, Serialize};

use crate::tasks::TickHandle;
use super::Mode;

/// Result of advancing a countdown by one tick
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running or already at zero
    Idle,
    /// One second was taken off; the countdown keeps running
    Ticked { remaining_seconds: u64 },
    /// The countdown reached zero on this tick
    Completed,
}

/// Label of the single timer button for the current countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Start,
    Pause,
    Restart,
}

impl TimerAction {
    pub fn label(self) -> &'static str {
        match self {
            TimerAction::Start => "start",
            TimerAction::Pause => "pause",
            TimerAction::Restart => "restart",
        }
    }
}

/// Countdown state for one mode panel.
///
/// While `running` is true a tick task is attached and the countdown loses
/// exactly one second per tick. `epoch` changes whenever a run starts or
/// stops, so a tick belonging to an earlier run can be told apart and dropped.
#[derive(Debug, Default)]
pub struct TimerState {
    total_seconds: u64,
    remaining_seconds: u64,
    running: bool,
    epoch: u64,
    ticker: Option<TickHandle>,
}

impl TimerState {
    /// Create an idle countdown with no time on it
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop any active run and load `minutes` worth of time
    pub fn configure(&mut self, minutes: u32) {
        self.stop();
        self.total_seconds = u64::from(minutes) * 60;
        self.remaining_seconds = self.total_seconds;
    }

    /// Mark the countdown as running and return the epoch of the new run.
    /// The caller attaches the tick task for that epoch.
    pub fn start(&mut self) -> u64 {
        self.stop();
        self.running = true;
        self.epoch
    }

    /// Attach the task ticking this run. Handles for a stale run are dropped
    /// straight away, which cancels them.
    pub fn attach_ticker(&mut self, epoch: u64, handle: TickHandle) {
        if self.is_current_run(epoch) {
            self.ticker = Some(handle);
        }
    }

    /// Stop ticking and keep the remaining time
    pub fn pause(&mut self) {
        self.stop();
    }

    /// Take one second off a running countdown
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running || self.remaining_seconds == 0 {
            return TickOutcome::Idle;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.stop();
            TickOutcome::Completed
        } else {
            TickOutcome::Ticked { remaining_seconds: self.remaining_seconds }
        }
    }

    /// Whether `epoch` identifies the run currently in progress
    pub fn is_current_run(&self, epoch: u64) -> bool {
        self.running && self.epoch == epoch
    }

    fn stop(&mut self) {
        self.running = false;
        self.epoch = self.epoch.wrapping_add(1);
        // Dropping the handle aborts the tick task
        self.ticker = None;
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }

    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Fraction of the countdown already elapsed, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        1.0 - self.remaining_seconds as f64 / self.total_seconds as f64
    }

    /// Percentage still remaining, as reported on the progress ring
    pub fn percent_remaining(&self) -> f64 {
        100.0 - self.progress() * 100.0
    }

    /// Remaining time formatted as `MM:SS`
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_seconds / 60, self.remaining_seconds % 60)
    }

    pub fn action(&self) -> TimerAction {
        if self.running {
            TimerAction::Pause
        } else if self.is_expired() && self.total_seconds > 0 {
            TimerAction::Restart
        } else {
            TimerAction::Start
        }
    }

    /// Serializable view of this countdown
    pub fn view(&self, mode: Mode) -> TimerView {
        TimerView {
            mode,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            progress: self.progress(),
            percent_remaining: self.percent_remaining(),
            display: self.display(),
            action: self.action(),
        }
    }
}

/// Snapshot of one countdown as sent to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub mode: Mode,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
    pub progress: f64,
    pub percent_remaining: f64,
    pub display: String,
    pub action: TimerAction,
}
