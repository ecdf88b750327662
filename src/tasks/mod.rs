//! Background tasks module
//!
//! This module contains the tasks that drive running countdowns.

pub mod ticker;

// Re-export main items
pub use ticker::{countdown_tick_task, spawn_ticker, TickHandle, TICK_PERIOD};
