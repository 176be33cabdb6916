//! Explicit session state
//!
//! Flags that used to live as globals shared across message handlers.
//! Each flag is a named field changed only through its transition
//! methods, so the dispatcher is the single place state can move.

/// Mutable state for one plugin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    listening_for_heading_selection: bool,
    scan_in_progress: bool,
    session_number: u64,
}

impl SessionState {
    /// Fresh state for the given session number
    #[must_use]
    pub fn new(session_number: u64) -> Self {
        Self {
            listening_for_heading_selection: false,
            scan_in_progress: false,
            session_number,
        }
    }

    /// The session counter value this session was started with
    #[inline]
    #[must_use]
    pub fn session_number(&self) -> u64 {
        self.session_number
    }

    /// Begin waiting for the user to click a heading target
    pub fn begin_heading_selection(&mut self) {
        self.listening_for_heading_selection = true;
    }

    /// Stop waiting for a heading target
    pub fn end_heading_selection(&mut self) {
        self.listening_for_heading_selection = false;
    }

    /// Whether a heading target selection is in flight
    #[inline]
    #[must_use]
    pub fn is_listening_for_heading_selection(&self) -> bool {
        self.listening_for_heading_selection
    }

    /// Mark a document scan as started
    pub fn begin_scan(&mut self) {
        self.scan_in_progress = true;
    }

    /// Mark the document scan as finished
    pub fn finish_scan(&mut self) {
        self.scan_in_progress = false;
    }

    /// Whether a scan is currently running
    #[inline]
    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.scan_in_progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_selection_transitions() {
        let mut state = SessionState::new(1);
        assert!(!state.is_listening_for_heading_selection());
        state.begin_heading_selection();
        assert!(state.is_listening_for_heading_selection());
        state.end_heading_selection();
        assert!(!state.is_listening_for_heading_selection());
    }
}
