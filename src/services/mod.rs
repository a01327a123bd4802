//! External notification services module
//!
//! This module contains the sinks that announce the end of a session.

pub mod notify;

// Re-export main types
pub use notify::*;
