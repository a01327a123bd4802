//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod console;
pub mod ticker;

// Re-export main functions
pub use console::console_view_task;
pub use ticker::spawn_ticker;
