//! Scoped browser session
//!
//! The driver's `dispose` must run exactly once after all steps complete,
//! on every exit path. The guard tracks disposal so a second call is a
//! no-op rather than a double teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use driver_bridge::{DriverError, UiDriver};
use panelprobe_core_types::SessionId;
use tracing::{debug, info};

pub struct ScopedSession {
    driver: Arc<dyn UiDriver>,
    id: SessionId,
    disposed: AtomicBool,
}

impl ScopedSession {
    pub fn new(driver: Arc<dyn UiDriver>) -> Self {
        Self {
            driver,
            id: SessionId::new(),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn driver(&self) -> &dyn UiDriver {
        self.driver.as_ref()
    }

    /// Tear the underlying session down. Idempotent: only the first call
    /// reaches the driver.
    pub async fn dispose(&self) -> Result<(), DriverError> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            debug!(session = %self.id.0, "session already disposed");
            return Ok(());
        }
        info!(session = %self.id.0, "disposing browser session");
        self.driver.dispose().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driver_bridge::StubDriver;

    #[tokio::test]
    async fn dispose_reaches_the_driver_exactly_once() {
        let driver = Arc::new(StubDriver::new());
        let session = ScopedSession::new(driver.clone());

        session.dispose().await.unwrap();
        session.dispose().await.unwrap();

        assert_eq!(driver.dispose_count(), 1);
    }
}
