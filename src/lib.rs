//! Pomodoro Server - A state-managed HTTP server driving a Pomodoro timer
//!
//! This library provides the work/break state machine, its per-mode
//! countdowns, persisted settings and statistics, and the HTTP API a
//! browser front end drives it through.

pub mod config;
pub mod state;
pub mod store;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
