//! Completed-session statistics

use serde::{Deserialize, Serialize};

use super::Mode;

/// Number of naturally completed countdowns per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SessionStats {
    pub pomodoro: u64,
    pub short_break: u64,
    pub long_break: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.pomodoro,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Count one natural completion of `mode`
    pub fn record(&mut self, mode: Mode) -> u64 {
        let counter = match mode {
            Mode::Work => &mut self.pomodoro,
            Mode::ShortBreak => &mut self.short_break,
            Mode::LongBreak => &mut self.long_break,
        };
        *counter += 1;
        *counter
    }

    pub fn total(&self) -> u64 {
        self.pomodoro + self.short_break + self.long_break
    }
}
