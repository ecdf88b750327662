//! Typed record of everything persisted between runs

use std::str::FromStr;
use tracing::debug;

use crate::store::Entries;
use super::{
    appearance::{AccentColor, Font},
    durations::{DurationRegistry, MAX_MINUTES, MIN_MINUTES},
    stats::SessionStats,
    Mode,
};

/// Key holding the work session counter
pub const SESSION_COUNT_KEY: &str = "sessionCount";
pub const FONT_KEY: &str = "font";
pub const COLOR_KEY: &str = "color";

/// Settings and statistics as stored in the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedState {
    pub durations: DurationRegistry,
    pub font: Font,
    pub color: AccentColor,
    pub session_count: u64,
    pub stats: SessionStats,
}

impl PersistedState {
    /// Decode stored entries. Missing or unparseable values fall back to
    /// their defaults individually.
    pub fn from_entries(entries: &Entries) -> Self {
        let mut durations = DurationRegistry::new();
        for mode in Mode::ALL {
            if let Some(minutes) = parse::<u32>(entries, mode.key())
                .filter(|m| (MIN_MINUTES..=MAX_MINUTES).contains(m))
            {
                durations.set(mode, minutes);
            }
        }

        let stats = SessionStats {
            pomodoro: parse(entries, Mode::Work.stats_key()).unwrap_or(0),
            short_break: parse(entries, Mode::ShortBreak.stats_key()).unwrap_or(0),
            long_break: parse(entries, Mode::LongBreak.stats_key()).unwrap_or(0),
        };

        Self {
            durations,
            font: parse(entries, FONT_KEY).unwrap_or_default(),
            color: parse(entries, COLOR_KEY).unwrap_or_default(),
            session_count: parse(entries, SESSION_COUNT_KEY).unwrap_or(0),
            stats,
        }
    }

    /// Encode as flat string entries
    pub fn to_entries(&self) -> Entries {
        let mut entries = Entries::new();
        for mode in Mode::ALL {
            entries.insert(mode.key().to_string(), self.durations.get(mode).to_string());
            entries.insert(mode.stats_key().to_string(), self.stats.get(mode).to_string());
        }
        entries.insert(FONT_KEY.to_string(), self.font.id().to_string());
        entries.insert(COLOR_KEY.to_string(), self.color.id().to_string());
        entries.insert(SESSION_COUNT_KEY.to_string(), self.session_count.to_string());
        entries
    }
}

fn parse<T: FromStr>(entries: &Entries, key: &str) -> Option<T> {
    let raw = entries.get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring unparseable value for {}: {:?}", key, raw);
            None
        }
    }
}
