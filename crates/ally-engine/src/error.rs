//! Engine error taxonomy
//!
//! Everything here is recoverable by design: a missing node aborts one
//! operation, a failed migration step aborts one root, and nothing
//! panics. The `Display` form of the reference errors doubles as the
//! machine-readable tag shown in user notifications
//! (e.g. `no-landmark::mainPageNodeNotFound`).

use ally_tree::TreeError;

/// Errors raised by encoders, the walker and the migration engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The page's backing node was deleted since the session started
    #[error("{op}::mainPageNodeNotFound")]
    PageNodeGone {
        /// Operation tag, e.g. `no-landmark`
        op: &'static str,
    },

    /// A previously known annotation node no longer resolves
    #[error("{op}::annotationNodeNotFound")]
    ReferenceGone {
        /// Operation tag, e.g. `remove-heading`
        op: &'static str,
    },

    /// Underlying tree mutation failed
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl EngineError {
    /// Machine-readable tag for user notifications
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_identify_the_failing_operation() {
        let err = EngineError::PageNodeGone { op: "no-landmark" };
        assert_eq!(err.tag(), "no-landmark::mainPageNodeNotFound");

        let err = EngineError::ReferenceGone { op: "remove-heading" };
        assert_eq!(err.tag(), "remove-heading::annotationNodeNotFound");
    }
}
