//! Pomodoro Widget - A single-page work/break countdown timer
//!
//! This library provides the timer engine with its work/break state machine,
//! completion notifications, and the page and HTTP endpoints that present it.

pub mod api;
pub mod config;
pub mod engine;
pub mod presentation;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::TimerEngine;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
