//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::presentation::{DraftValue, TimerView};

/// Body of the duration setters: the committed draft from an input field
#[derive(Debug, Clone, Deserialize)]
pub struct DurationRequest {
    pub minutes: DraftValue,
}

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response whose status mirrors the run state of `timer`
    pub fn from_view(message: String, timer: TimerView) -> Self {
        let status = if timer.is_running { "running" } else { "stopped" };
        Self::new(status.to_string(), message, timer)
    }

    /// Response for a draft that was discarded
    pub fn unchanged(message: String, timer: TimerView) -> Self {
        Self::new("unchanged".to_string(), message, timer)
    }
}

/// Status response with the render model and activity tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
