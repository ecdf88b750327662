//! State management module
//!
//! This module contains the Pomodoro state machine, its building blocks and
//! the shared application state that serialises access to it.

pub mod app_state;
pub mod appearance;
pub mod controller;
pub mod durations;
pub mod mode;
pub mod persisted;
pub mod settings;
pub mod snapshot;
pub mod stats;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use appearance::{AccentColor, Font};
pub use controller::{ControllerOptions, PomodoroController, Run, TickReport, Transition};
pub use durations::DurationRegistry;
pub use mode::Mode;
pub use persisted::PersistedState;
pub use settings::{Settings, SettingsUpdate};
pub use snapshot::Snapshot;
pub use stats::SessionStats;
pub use timer_state::{TickOutcome, TimerAction, TimerState, TimerView};
