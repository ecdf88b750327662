//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{store::KeyValueStore, tasks::spawn_ticker};
use super::{
    ControllerOptions, Mode, PomodoroController, Run, Settings, SettingsUpdate, Snapshot,
};

/// Main application state that owns the Pomodoro controller.
///
/// Every operation takes the controller lock once, performs the whole
/// mutation (stopping other countdowns, attaching tick tasks, completion
/// handling, persistence) and publishes the resulting snapshot before the
/// lock is released.
pub struct AppState {
    /// The single controller instance
    pub controller: Mutex<PomodoroController>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing a snapshot after every change
    pub snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Snapshot>,
}

impl AppState {
    /// Create a new AppState, hydrating the controller from `store`
    pub fn new(
        port: u16,
        host: String,
        store: Box<dyn KeyValueStore>,
        options: ControllerOptions,
    ) -> Self {
        let controller = PomodoroController::new(store, options);
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());

        Self {
            controller: Mutex::new(controller),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply `updater` to the controller and publish the new snapshot
    pub fn update<F, R>(&self, action: &str, updater: F) -> Result<(R, Snapshot), String>
    where
        F: FnOnce(&mut PomodoroController) -> R,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock controller: {}", e))?;

        let result = updater(&mut *controller);
        let snapshot = controller.snapshot();
        self.publish(snapshot.clone());
        drop(controller);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok((result, snapshot))
    }

    fn publish(&self, snapshot: Snapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send snapshot update: {}", e);
        }
    }

    /// Spawn the tick task for `run` and hand it to the countdown
    fn schedule(self: &Arc<Self>, controller: &mut PomodoroController, run: Run) {
        let handle = spawn_ticker(Arc::clone(self), run);
        controller.attach_ticker(run, handle);
    }

    /// Start the countdown for `mode`
    pub fn start(self: &Arc<Self>, mode: Mode) -> Result<Snapshot, String> {
        info!("Start requested for {}", mode);
        self.update("start", |controller| {
            if let Some(run) = controller.start(mode) {
                self.schedule(controller, run);
            }
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Pause the countdown for `mode`
    pub fn pause(&self, mode: Mode) -> Result<Snapshot, String> {
        self.update("pause", |controller| controller.pause(mode))
            .map(|(_, snapshot)| snapshot)
    }

    /// Reset the countdown for `mode` to its configured duration
    pub fn reset(&self, mode: Mode) -> Result<Snapshot, String> {
        self.update("reset", |controller| controller.reset(mode))
            .map(|(_, snapshot)| snapshot)
    }

    /// Press the timer button of `mode`
    pub fn press(self: &Arc<Self>, mode: Mode) -> Result<Snapshot, String> {
        self.update("press", |controller| {
            if let Some(run) = controller.press(mode) {
                self.schedule(controller, run);
            }
        })
        .map(|(_, snapshot)| snapshot)
    }

    /// Manually switch to `mode`
    pub fn select_mode(&self, mode: Mode) -> Result<Snapshot, String> {
        info!("Mode {} selected", mode);
        self.update("select-mode", |controller| controller.select_mode(mode))
            .map(|(_, snapshot)| snapshot)
    }

    /// Apply a submitted settings form
    pub fn apply_settings(&self, update: &SettingsUpdate) -> Result<(Settings, Snapshot), String> {
        self.update("settings", |controller| controller.apply_settings(update))
    }

    /// Tick on behalf of the task for run `epoch`. Returns whether that run
    /// is still going.
    pub fn scheduled_tick(self: &Arc<Self>, mode: Mode, epoch: u64) -> Result<bool, String> {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock controller: {}", e))?;

        let Some(report) = controller.scheduled_tick(mode, epoch) else {
            return Ok(false);
        };

        if let Some(transition) = report.transition {
            if let Some(run) = transition.started {
                self.schedule(&mut *controller, run);
            }
        }

        self.publish(controller.snapshot());
        Ok(report.still_running())
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<Snapshot, String> {
        self.controller.lock()
            .map(|controller| controller.snapshot())
            .map_err(|e| format!("Failed to lock controller: {}", e))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Flush settings and statistics to the store
    pub fn persist(&self) -> Result<(), String> {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock controller: {}", e))?;
        controller.persist();
        Ok(())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
