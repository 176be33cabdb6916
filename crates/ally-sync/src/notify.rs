//! Transient user notifications
//!
//! Recoverable failures (a deleted page node, a partial migration) are
//! surfaced to the user as short, timed notifications carrying a
//! machine-readable tag identifying the failing operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default display time for a notification
pub const DEFAULT_TIMEOUT_MS: u64 = 4_000;

/// One timed notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Machine-readable tag, e.g. `no-landmark::mainPageNodeNotFound`
    pub tag: String,
    /// Human-readable message
    pub message: String,
    /// Display time in milliseconds
    pub timeout_ms: u64,
    /// When the notification was raised
    pub at: DateTime<Utc>,
}

impl Notification {
    /// Notification with the default timeout, stamped now
    #[must_use]
    pub fn new(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            at: Utc::now(),
        }
    }
}
