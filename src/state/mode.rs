//! Timer modes and the identifiers they are stored and routed under

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// One of the three Pomodoro modes. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    /// Focused work session ("pomodoro")
    #[serde(rename = "pomodoro")]
    Work,
    #[serde(rename = "short-break")]
    ShortBreak,
    #[serde(rename = "long-break")]
    LongBreak,
}

impl Mode {
    /// All modes in panel order
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Position of the mode in per-mode arrays
    pub fn index(self) -> usize {
        match self {
            Mode::Work => 0,
            Mode::ShortBreak => 1,
            Mode::LongBreak => 2,
        }
    }

    /// Identifier used for the duration key and in API paths
    pub fn key(self) -> &'static str {
        match self {
            Mode::Work => "pomodoro",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Key the completed-session counter for this mode is stored under
    pub fn stats_key(self) -> &'static str {
        match self {
            Mode::Work => "pomodoroCount",
            Mode::ShortBreak => "shortBreakCount",
            Mode::LongBreak => "longBreakCount",
        }
    }

    /// Factory duration in minutes
    pub fn default_minutes(self) -> u32 {
        match self {
            Mode::Work => 25,
            Mode::ShortBreak => 5,
            Mode::LongBreak => 15,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.key() == s)
            .ok_or_else(|| format!("Unknown timer mode: {}", s))
    }
}
