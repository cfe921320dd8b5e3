//! Browser driver seam for the PanelProbe harness.
//!
//! The harness core never touches a real browser directly; it talks to the
//! [`UiDriver`] port, which yields intent-level [`PageSnapshot`] values
//! instead of DOM nodes or selectors. A scripted [`StubDriver`] (feature
//! `stub`, on by default) plays back timed snapshot frames for tests.

pub mod errors;
pub mod model;
pub mod ports;

#[cfg(feature = "stub")]
pub mod stub;

pub use errors::DriverError;
pub use model::{ClickTarget, NodeKind, PageSnapshot, UiNode};
pub use ports::UiDriver;

#[cfg(feature = "stub")]
pub use stub::{StubDriver, StubFrame};
