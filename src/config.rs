//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::state::ControllerOptions;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server driving a Pomodoro work/break timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file holding settings and session statistics
    #[arg(short, long, default_value = "pomodoro.json")]
    pub store: PathBuf,

    /// Completed work sessions between long breaks
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u64).range(1..))]
    pub long_break_interval: u64,

    /// Start the next countdown as soon as one completes
    #[arg(long)]
    pub auto_start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            long_break_interval: self.long_break_interval,
            auto_start: self.auto_start,
        }
    }
}
