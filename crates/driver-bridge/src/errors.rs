//! Error types for the driver seam

use thiserror::Error;

/// Errors surfaced by a [`crate::UiDriver`] implementation.
///
/// Transient variants describe expected absence while a page is still
/// loading; the wait engine absorbs them per poll tick. Non-transient
/// variants mean the browsing session itself is unusable and abort the run.
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    /// Element lookup failed (not rendered yet, or genuinely absent)
    #[error("Element lookup failed: {0}")]
    LookupFailed(String),

    /// Element reference went stale (re-render or frame navigation)
    #[error("Stale element reference: {0}")]
    StaleElement(String),

    /// Navigation request was rejected or did not commit
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// The browsing session itself is gone
    #[error("Browsing session gone: {0}")]
    SessionGone(String),

    /// Transport-level failure talking to the driver
    #[error("Driver I/O error: {0}")]
    Io(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal driver error: {0}")]
    Internal(String),
}

impl DriverError {
    /// Whether this error is an expected transient state during page load.
    ///
    /// Transient errors are absorbed by polling; everything else is an
    /// infrastructure fault that must propagate immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DriverError::LookupFailed(_)
                | DriverError::StaleElement(_)
                | DriverError::NavigationFailed(_)
        )
    }
}
