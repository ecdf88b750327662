//! Serializable view of the whole timer, published after every change

use serde::{Deserialize, Serialize};

use super::{Mode, SessionStats, Settings, TimerView};

/// Everything the presentation layer needs to re-render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub current_mode: Mode,
    pub timers: Vec<TimerView>,
    pub session_count: u64,
    pub stats: SessionStats,
    pub settings: Settings,
}

impl Snapshot {
    pub fn timer(&self, mode: Mode) -> Option<&TimerView> {
        self.timers.iter().find(|t| t.mode == mode)
    }

    /// The countdown currently running, if any
    pub fn running(&self) -> Option<&TimerView> {
        self.timers.iter().find(|t| t.running)
    }
}
