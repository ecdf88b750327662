//! Configured minute lengths for each mode

use super::Mode;

/// Smallest duration the settings form accepts, in minutes
pub const MIN_MINUTES: u32 = 1;
/// Largest duration the settings form accepts, in minutes
pub const MAX_MINUTES: u32 = 60;

/// Clamp raw user input into the accepted duration range
pub fn clamp_minutes(raw: i64) -> u32 {
    raw.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32
}

/// Mapping from mode to its configured duration in minutes.
///
/// Values are expected to be clamped before they are stored here; setting a
/// duration never touches a countdown, that only happens when settings are
/// applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationRegistry {
    minutes: [u32; 3],
}

impl DurationRegistry {
    pub fn new() -> Self {
        Self {
            minutes: Mode::ALL.map(Mode::default_minutes),
        }
    }

    pub fn get(&self, mode: Mode) -> u32 {
        self.minutes[mode.index()]
    }

    pub fn set(&mut self, mode: Mode, minutes: u32) {
        debug_assert!(minutes > 0, "durations must be positive");
        self.minutes[mode.index()] = minutes;
    }
}

impl Default for DurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_with_defaults() {
        let registry = DurationRegistry::new();
        assert_eq!(registry.get(Mode::Work), 25);
        assert_eq!(registry.get(Mode::ShortBreak), 5);
        assert_eq!(registry.get(Mode::LongBreak), 15);
    }

    #[test]
    fn set_only_changes_one_mode() {
        let mut registry = DurationRegistry::new();
        registry.set(Mode::LongBreak, 30);
        assert_eq!(registry.get(Mode::LongBreak), 30);
        assert_eq!(registry.get(Mode::Work), 25);
        assert_eq!(registry.get(Mode::ShortBreak), 5);
    }

    #[test]
    fn clamps_out_of_range_input() {
        assert_eq!(clamp_minutes(0), 1);
        assert_eq!(clamp_minutes(-12), 1);
        assert_eq!(clamp_minutes(45), 45);
        assert_eq!(clamp_minutes(600), 60);
    }
}
