//! Mode controller: the Pomodoro state machine
//!
//! One controller instance owns every countdown, the duration registry, the
//! statistics and the work session counter. Callers serialise access to it
//! (see [`AppState`](super::AppState)); nothing in here is shared.

use tracing::{debug, info, warn};

use crate::{store::KeyValueStore, tasks::TickHandle};
use super::{
    appearance::{AccentColor, Font},
    durations::DurationRegistry,
    persisted::PersistedState,
    settings::{Settings, SettingsUpdate},
    snapshot::Snapshot,
    stats::SessionStats,
    timer_state::{TickOutcome, TimerAction, TimerState},
    Mode,
};

/// Behaviour knobs that are not part of the persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Every n-th completed work session is followed by a long break
    pub long_break_interval: u64,
    /// Start the next countdown right after a completion
    pub auto_start: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            long_break_interval: 4,
            auto_start: false,
        }
    }
}

/// A countdown run that needs a tick task attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub mode: Mode,
    pub epoch: u64,
}

/// Mode change caused by a natural completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub completed: Mode,
    pub next: Mode,
    pub session_count: u64,
    /// Set when the next countdown was started straight away
    pub started: Option<Run>,
}

/// Outcome of a tick routed through the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub transition: Option<Transition>,
}

impl TickReport {
    /// Whether the countdown that was ticked keeps running
    pub fn still_running(&self) -> bool {
        matches!(self.outcome, TickOutcome::Ticked { .. })
    }
}

pub struct PomodoroController {
    timers: [TimerState; 3],
    durations: DurationRegistry,
    font: Font,
    color: AccentColor,
    stats: SessionStats,
    session_count: u64,
    current: Mode,
    options: ControllerOptions,
    store: Box<dyn KeyValueStore>,
}

impl PomodoroController {
    /// Hydrate from `store` and reset every countdown to its configured duration
    pub fn new(store: Box<dyn KeyValueStore>, options: ControllerOptions) -> Self {
        let persisted = match store.load() {
            Ok(entries) => PersistedState::from_entries(&entries),
            Err(e) => {
                warn!("Failed to load persisted state, using defaults: {:#}", e);
                PersistedState::default()
            }
        };

        info!(
            "Loaded state: session_count={}, stats={:?}",
            persisted.session_count, persisted.stats
        );

        let mut controller = Self {
            timers: Default::default(),
            durations: persisted.durations,
            font: persisted.font,
            color: persisted.color,
            stats: persisted.stats,
            session_count: persisted.session_count,
            current: Mode::Work,
            options: ControllerOptions {
                long_break_interval: options.long_break_interval.max(1),
                ..options
            },
            store,
        };
        for mode in Mode::ALL {
            controller.reset(mode);
        }
        controller
    }

    // Queries

    pub fn current_mode(&self) -> Mode {
        self.current
    }

    pub fn timer(&self, mode: Mode) -> &TimerState {
        &self.timers[mode.index()]
    }

    /// Mode whose countdown is running, if any
    pub fn running_mode(&self) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| self.timer(*m).is_running())
    }

    pub fn durations(&self) -> &DurationRegistry {
        &self.durations
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn settings(&self) -> Settings {
        Settings::from_parts(&self.durations, self.font, self.color)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            current_mode: self.current,
            timers: Mode::ALL.iter().map(|m| self.timer(*m).view(*m)).collect(),
            session_count: self.session_count,
            stats: self.stats,
            settings: self.settings(),
        }
    }

    // Countdown operations

    /// Load `minutes` into the countdown for `mode`, stopping it
    pub fn configure(&mut self, mode: Mode, minutes: u32) {
        self.timers[mode.index()].configure(minutes);
    }

    /// Reset `mode` to its configured duration
    pub fn reset(&mut self, mode: Mode) {
        let minutes = self.durations.get(mode);
        self.configure(mode, minutes);
    }

    /// Start the countdown for `mode`, making it the current mode.
    ///
    /// Any other running countdown is stopped and reset first. An expired
    /// countdown is reloaded before it starts again. Starting a countdown
    /// that is already running changes nothing and returns `None`, so its
    /// tick task keeps its schedule.
    pub fn start(&mut self, mode: Mode) -> Option<Run> {
        if self.timer(mode).is_running() {
            debug!("{} countdown already running", mode);
            return None;
        }

        self.reset_others(mode);

        if self.timer(mode).is_expired() {
            self.reset(mode);
        }

        self.current = mode;
        let epoch = self.timers[mode.index()].start();
        info!("Started {} countdown with {}s left", mode, self.timer(mode).remaining_seconds());
        Some(Run { mode, epoch })
    }

    /// Hand the tick task for `run` to its countdown
    pub fn attach_ticker(&mut self, run: Run, handle: TickHandle) {
        self.timers[run.mode.index()].attach_ticker(run.epoch, handle);
    }

    /// Pause `mode`, keeping its remaining time
    pub fn pause(&mut self, mode: Mode) {
        let timer = &mut self.timers[mode.index()];
        if timer.is_running() {
            timer.pause();
            info!("Paused {} countdown at {}s", mode, timer.remaining_seconds());
        }
    }

    /// The panel's single button: start, pause or restart depending on state
    pub fn press(&mut self, mode: Mode) -> Option<Run> {
        match self.timer(mode).action() {
            TimerAction::Start => self.start(mode),
            TimerAction::Pause => {
                self.pause(mode);
                None
            }
            TimerAction::Restart => {
                self.reset(mode);
                None
            }
        }
    }

    /// Advance the countdown for `mode` by one tick
    pub fn tick(&mut self, mode: Mode) -> TickReport {
        let outcome = self.timers[mode.index()].tick();
        let transition = match outcome {
            TickOutcome::Completed => Some(self.complete(mode)),
            TickOutcome::Ticked { remaining_seconds } => {
                debug!("{} tick, {}s left", mode, remaining_seconds);
                None
            }
            TickOutcome::Idle => None,
        };
        TickReport { outcome, transition }
    }

    /// Tick on behalf of the task scheduled for run `epoch`. Ticks from a
    /// run that has since been paused or replaced are discarded.
    pub fn scheduled_tick(&mut self, mode: Mode, epoch: u64) -> Option<TickReport> {
        if !self.timer(mode).is_current_run(epoch) {
            debug!("Discarding stale tick for {} (epoch {})", mode, epoch);
            return None;
        }
        Some(self.tick(mode))
    }

    // Mode transitions

    /// Manually select `mode`. Resets its countdown, stops any other running
    /// countdown and leaves the counter and statistics alone.
    pub fn select_mode(&mut self, mode: Mode) {
        self.reset_others(mode);
        self.switch_mode(mode);
    }

    fn switch_mode(&mut self, mode: Mode) {
        info!("Switching mode {} -> {}", self.current, mode);
        self.current = mode;
        self.reset(mode);
    }

    fn complete(&mut self, mode: Mode) -> Transition {
        self.stats.record(mode);

        let next = if mode == Mode::Work {
            self.session_count += 1;
            if self.session_count % self.options.long_break_interval == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            }
        } else {
            Mode::Work
        };
        self.persist();

        info!(
            "{} session complete (work sessions: {}), next: {}",
            mode, self.session_count, next
        );
        self.switch_mode(next);

        let started = if self.options.auto_start {
            self.start(next)
        } else {
            None
        };
        Transition {
            completed: mode,
            next,
            session_count: self.session_count,
            started,
        }
    }

    fn reset_others(&mut self, mode: Mode) {
        for other in Mode::ALL {
            if other != mode && self.timer(other).is_running() {
                debug!("Stopping {} countdown", other);
                self.reset(other);
            }
        }
    }

    // Statistics and settings

    /// Count a natural completion of `mode` and persist the counters
    pub fn record_completion(&mut self, mode: Mode) -> u64 {
        let count = self.stats.record(mode);
        self.persist();
        count
    }

    /// Change the configured duration of `mode` without touching its countdown
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) {
        self.durations.set(mode, minutes);
        self.persist();
    }

    /// Apply a submitted settings form: store the new values and reset every
    /// countdown to its configured duration.
    pub fn apply_settings(&mut self, update: &SettingsUpdate) -> Settings {
        let settings = update.resolve(&self.settings());

        for mode in Mode::ALL {
            self.durations.set(mode, settings.minutes(mode));
        }
        self.font = settings.font;
        self.color = settings.color;
        self.persist();

        for mode in Mode::ALL {
            self.reset(mode);
        }

        info!("Applied settings: {:?}", settings);
        settings
    }

    fn persisted(&self) -> PersistedState {
        PersistedState {
            durations: self.durations.clone(),
            font: self.font,
            color: self.color,
            session_count: self.session_count,
            stats: self.stats,
        }
    }

    /// Write settings and statistics to the store. Failures are logged only.
    pub fn persist(&mut self) {
        let entries = self.persisted().to_entries();
        if let Err(e) = self.store.save(&entries) {
            warn!("Failed to persist state: {:#}", e);
        }
    }
}
