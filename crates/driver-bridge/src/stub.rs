//! Scripted stub driver
//!
//! Plays back a per-destination script of snapshot frames: each
//! `query_ui_state` call consumes the next frame, and the final frame
//! repeats. Frames may be transient errors, which lets tests exercise the
//! wait engine's error-absorption behavior deterministically.

use std::collections::HashMap;

use parking_lot::Mutex;
use panelprobe_core_types::Destination;
use tracing::debug;

use crate::errors::DriverError;
use crate::model::{ClickTarget, PageSnapshot};
use crate::ports::UiDriver;
use async_trait::async_trait;

/// One scripted probe outcome
#[derive(Debug, Clone)]
pub enum StubFrame {
    /// Probe succeeds with this snapshot
    Snapshot(PageSnapshot),

    /// Probe fails with a transient lookup error
    TransientError(String),

    /// Probe fails with an infrastructure fault
    FatalError(String),
}

impl StubFrame {
    /// `count` transient frames followed by the ready snapshot.
    pub fn loading_then(count: usize, snapshot: PageSnapshot) -> Vec<StubFrame> {
        let mut frames = vec![StubFrame::TransientError("page still loading".into()); count];
        frames.push(StubFrame::Snapshot(snapshot));
        frames
    }
}

#[derive(Default)]
struct CurrentPage {
    frames: Vec<StubFrame>,
    cursor: usize,
}

#[derive(Default)]
struct StubState {
    pages: HashMap<String, Vec<StubFrame>>,
    click_effects: HashMap<String, Vec<StubFrame>>,
    navigate_errors: HashMap<String, DriverError>,
    current: Option<CurrentPage>,
    navigations: Vec<Destination>,
    clicks: Vec<ClickTarget>,
    probes: usize,
    disposals: usize,
}

/// Scripted [`UiDriver`] for tests and demo runs.
pub struct StubDriver {
    state: Mutex<StubState>,
}

impl StubDriver {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StubState::default()),
        }
    }

    /// Script the frames served after navigating to `url`.
    pub fn with_page(self, url: impl Into<String>, frames: Vec<StubFrame>) -> Self {
        self.state.lock().pages.insert(url.into(), frames);
        self
    }

    /// Script the frames served after a click on the target with `label`.
    pub fn with_click_effect(self, label: impl Into<String>, frames: Vec<StubFrame>) -> Self {
        self.state.lock().click_effects.insert(label.into(), frames);
        self
    }

    /// Make navigation to `url` fail with `error`.
    pub fn with_navigate_error(self, url: impl Into<String>, error: DriverError) -> Self {
        self.state.lock().navigate_errors.insert(url.into(), error);
        self
    }

    /// Destinations navigated to, in order.
    pub fn navigations(&self) -> Vec<Destination> {
        self.state.lock().navigations.clone()
    }

    /// Clicks dispatched, in order.
    pub fn clicks(&self) -> Vec<ClickTarget> {
        self.state.lock().clicks.clone()
    }

    /// Total `query_ui_state` invocations.
    pub fn probe_count(&self) -> usize {
        self.state.lock().probes
    }

    /// Total `dispose` invocations.
    pub fn dispose_count(&self) -> usize {
        self.state.lock().disposals
    }
}

impl Default for StubDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UiDriver for StubDriver {
    async fn navigate(&self, destination: &Destination) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        state.navigations.push(destination.clone());

        if let Some(error) = state.navigate_errors.get(destination.as_str()) {
            return Err(error.clone());
        }

        let frames = state
            .pages
            .get(destination.as_str())
            .cloned()
            .unwrap_or_else(|| {
                // Unknown routes render an empty page, the way an SPA serves
                // its shell for any path.
                vec![StubFrame::Snapshot(PageSnapshot::new(
                    destination.as_str(),
                    "",
                ))]
            });

        debug!(destination = %destination, frames = frames.len(), "stub navigation");
        state.current = Some(CurrentPage { frames, cursor: 0 });
        Ok(())
    }

    async fn query_ui_state(&self) -> Result<PageSnapshot, DriverError> {
        let mut state = self.state.lock();
        if state.disposals > 0 {
            return Err(DriverError::SessionGone("session disposed".into()));
        }
        state.probes += 1;

        let current = state
            .current
            .as_mut()
            .ok_or_else(|| DriverError::Internal("no navigation issued".into()))?;
        if current.frames.is_empty() {
            return Err(DriverError::Internal("empty page script".into()));
        }

        let index = current.cursor.min(current.frames.len() - 1);
        let frame = current.frames[index].clone();
        current.cursor += 1;

        match frame {
            StubFrame::Snapshot(snapshot) => Ok(snapshot),
            StubFrame::TransientError(message) => Err(DriverError::LookupFailed(message)),
            StubFrame::FatalError(message) => Err(DriverError::SessionGone(message)),
        }
    }

    async fn click(&self, target: &ClickTarget) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        if state.disposals > 0 {
            return Err(DriverError::SessionGone("session disposed".into()));
        }
        state.clicks.push(target.clone());

        match state.click_effects.get(target.label()).cloned() {
            Some(frames) => {
                debug!(%target, frames = frames.len(), "stub click");
                state.current = Some(CurrentPage { frames, cursor: 0 });
                Ok(())
            }
            None => Err(DriverError::LookupFailed(format!("{target} not found"))),
        }
    }

    async fn dispose(&self) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        state.disposals += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_page(url: &str) -> PageSnapshot {
        PageSnapshot::new(url, "Score App").with_heading("Hello, prof")
    }

    #[tokio::test]
    async fn frames_advance_and_last_repeats() {
        let url = "http://localhost:3000/#/professor-panel";
        let driver = StubDriver::new().with_page(url, StubFrame::loading_then(2, ready_page(url)));

        driver.navigate(&Destination::new(url)).await.unwrap();
        assert!(driver.query_ui_state().await.unwrap_err().is_transient());
        assert!(driver.query_ui_state().await.unwrap_err().is_transient());
        assert!(driver.query_ui_state().await.unwrap().heading_contains("Hello,"));
        // repeats once the script ends
        assert!(driver.query_ui_state().await.unwrap().heading_contains("Hello,"));
        assert_eq!(driver.probe_count(), 4);
    }

    #[tokio::test]
    async fn navigation_resets_the_script() {
        let url = "http://localhost:3000/panel";
        let driver = StubDriver::new().with_page(url, StubFrame::loading_then(1, ready_page(url)));

        driver.navigate(&Destination::new(url)).await.unwrap();
        let _ = driver.query_ui_state().await;
        driver.navigate(&Destination::new(url)).await.unwrap();
        assert!(driver.query_ui_state().await.unwrap_err().is_transient());
        assert_eq!(driver.navigations().len(), 2);
    }

    #[tokio::test]
    async fn click_swaps_frames_or_fails_lookup() {
        let url = "http://localhost:3000/panel";
        let menu = ready_page(url).with_text("Live grades (CSV)");
        let driver = StubDriver::new()
            .with_page(url, vec![StubFrame::Snapshot(ready_page(url))])
            .with_click_effect("Export", vec![StubFrame::Snapshot(menu)]);

        driver.navigate(&Destination::new(url)).await.unwrap();
        driver.click(&ClickTarget::button("Export")).await.unwrap();
        assert!(driver.query_ui_state().await.unwrap().text_contains("Live grades"));

        let missing = driver.click(&ClickTarget::button("Nope")).await.unwrap_err();
        assert!(missing.is_transient());
    }

    #[tokio::test]
    async fn disposal_makes_the_session_unusable() {
        let driver = StubDriver::new();
        driver.dispose().await.unwrap();
        assert_eq!(driver.dispose_count(), 1);
        let err = driver.query_ui_state().await.unwrap_err();
        assert!(!err.is_transient());
    }
}
