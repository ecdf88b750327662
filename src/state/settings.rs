//! User-facing settings: durations and appearance

use serde::{Deserialize, Serialize};

use super::{
    appearance::{AccentColor, Font},
    durations::{clamp_minutes, DurationRegistry},
    Mode,
};

/// Current settings as shown in the settings dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub pomodoro: u32,
    pub short_break: u32,
    pub long_break: u32,
    pub font: Font,
    pub color: AccentColor,
}

impl Settings {
    pub fn from_parts(durations: &DurationRegistry, font: Font, color: AccentColor) -> Self {
        Self {
            pomodoro: durations.get(Mode::Work),
            short_break: durations.get(Mode::ShortBreak),
            long_break: durations.get(Mode::LongBreak),
            font,
            color,
        }
    }

    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.pomodoro,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_parts(&DurationRegistry::new(), Font::default(), AccentColor::default())
    }
}

/// Submitted settings form. Missing fields keep their current value and raw
/// durations are clamped rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettingsUpdate {
    pub pomodoro: Option<i64>,
    pub short_break: Option<i64>,
    pub long_break: Option<i64>,
    pub font: Option<Font>,
    pub color: Option<AccentColor>,
}

impl SettingsUpdate {
    /// Raw minutes submitted for `mode`, if any
    pub fn raw_minutes(&self, mode: Mode) -> Option<i64> {
        match mode {
            Mode::Work => self.pomodoro,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Resolve the update against `current`, clamping durations into range
    pub fn resolve(&self, current: &Settings) -> Settings {
        let minutes = |mode: Mode| {
            self.raw_minutes(mode)
                .map(clamp_minutes)
                .unwrap_or_else(|| current.minutes(mode))
        };

        Settings {
            pomodoro: minutes(Mode::Work),
            short_break: minutes(Mode::ShortBreak),
            long_break: minutes(Mode::LongBreak),
            font: self.font.unwrap_or(current.font),
            color: self.color.unwrap_or(current.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_other_fields() {
        let current = Settings::default();
        let update = SettingsUpdate {
            short_break: Some(10),
            color: Some(AccentColor::Purple),
            ..Default::default()
        };

        let resolved = update.resolve(&current);
        assert_eq!(resolved.short_break, 10);
        assert_eq!(resolved.color, AccentColor::Purple);
        assert_eq!(resolved.pomodoro, 25);
        assert_eq!(resolved.font, Font::KumbhSans);
    }

    #[test]
    fn update_clamps_durations() {
        let update = SettingsUpdate {
            pomodoro: Some(0),
            long_break: Some(240),
            ..Default::default()
        };
        let resolved = update.resolve(&Settings::default());
        assert_eq!(resolved.pomodoro, 1);
        assert_eq!(resolved.long_break, 60);
    }

    #[test]
    fn json_uses_storage_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["short-break"], 5);
        assert_eq!(json["font"], "kumbh-sans");

        let update: SettingsUpdate = serde_json::from_str(r#"{"long-break": 20}"#).unwrap();
        assert_eq!(update.long_break, Some(20));
        assert_eq!(update.pomodoro, None);
    }
}
