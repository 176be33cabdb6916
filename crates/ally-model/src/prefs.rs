//! Persisted user preferences
//!
//! Stored as string-serialized JSON in a key/value preference store (see
//! `ally-sync::prefs` for the storage side).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named responsive breakpoint definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointDef {
    /// Viewport width in pixels
    pub width: u32,
    /// Display label, e.g. `Tablet`
    pub label: String,
}

/// All persisted preferences for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Condensed UI layout
    pub condensed_ui: bool,
    /// Whether the tip panel is expanded
    pub tip_expanded: bool,
    /// User-defined breakpoints for the responsive reflow step
    pub custom_breakpoints: Vec<BreakpointDef>,
    /// Feature-intro keys the user has already seen
    pub intros_seen: BTreeSet<String>,
    /// Monotonically incremented on every session start
    pub session_count: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            condensed_ui: false,
            tip_expanded: true,
            custom_breakpoints: Vec::new(),
            intros_seen: BTreeSet::new(),
            session_count: 0,
        }
    }
}

impl Preferences {
    /// Record that an intro was seen; returns `true` on first sight
    pub fn mark_intro_seen(&mut self, key: impl Into<String>) -> bool {
        self.intros_seen.insert(key.into())
    }

    /// Bump and return the session counter
    pub fn next_session(&mut self) -> u64 {
        self.session_count += 1;
        self.session_count
    }
}
