//! Configuration and CLI argument handling

use std::sync::Arc;
use clap::Parser;
use tracing::warn;

use crate::{
    services::{CommandNotifier, FallbackNotifier, Notifier, SilentNotifier, TerminalBell},
    state::{timer_state::{BREAK_MINUTES, WORK_MINUTES}, TimerConfig},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-widget")]
#[command(about = "A single-page work/break countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the widget server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Work session length in minutes (1-120)
    #[arg(short, long, default_value = "50")]
    pub work: u32,

    /// Break session length in minutes (1-60)
    #[arg(short = 'b', long = "break", default_value = "10")]
    pub break_minutes: u32,

    /// Command to play when a session ends, e.g. "paplay done.oga"
    #[arg(long)]
    pub sound_command: Option<String>,

    /// Do not ring the terminal bell when a session ends
    #[arg(long)]
    pub no_bell: bool,

    /// Also show the countdown on the terminal
    #[arg(long)]
    pub console: bool,

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

    /// Session durations, clamped into their valid ranges
    pub fn timer_config(&self) -> TimerConfig {
        if !WORK_MINUTES.contains(&self.work) {
            warn!("Work duration {}min out of range {:?}, clamping", self.work, WORK_MINUTES);
        }
        if !BREAK_MINUTES.contains(&self.break_minutes) {
            warn!("Break duration {}min out of range {:?}, clamping", self.break_minutes, BREAK_MINUTES);
        }
        TimerConfig::from_minutes(self.work, self.break_minutes)
    }

    /// Build the completion notifier from the sound options
    pub fn notifier(&self) -> Result<Arc<dyn Notifier>, String> {
        let bell: Box<dyn Notifier> = if self.no_bell {
            Box::new(SilentNotifier)
        } else {
            Box::new(TerminalBell)
        };

        match &self.sound_command {
            Some(command_line) => {
                let command = CommandNotifier::parse(command_line)?;
                Ok(Arc::new(FallbackNotifier::new(Box::new(command), bell)))
            }
            None => Ok(Arc::from(bell)),
        }
    }
}
