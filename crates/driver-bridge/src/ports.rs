//! Port trait the harness drives a live browser session through

use async_trait::async_trait;
use panelprobe_core_types::Destination;

use crate::errors::DriverError;
use crate::model::{ClickTarget, PageSnapshot};

/// Browser session port.
///
/// One instance owns one live browsing session. The session is a single
/// shared mutable resource: callers must serialize operations against it,
/// one logical test step at a time.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Request the UI load the given destination.
    async fn navigate(&self, destination: &Destination) -> Result<(), DriverError>;

    /// Read the current UI state. Side-effecting from the driver's point of
    /// view, but safe to invoke repeatedly.
    async fn query_ui_state(&self) -> Result<PageSnapshot, DriverError>;

    /// Dispatch a click on an intent-level target.
    async fn click(&self, target: &ClickTarget) -> Result<(), DriverError>;

    /// Tear the session down. Must be called exactly once, after all steps.
    async fn dispose(&self) -> Result<(), DriverError>;
}
