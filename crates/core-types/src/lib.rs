//! Shared primitives for the PanelProbe harness crates.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for harness-level failures that are not tied to a
/// single component (configuration errors, session misuse).
#[derive(Debug, Error, Clone)]
pub enum HarnessError {
    #[error("{message}")]
    Message { message: String },
}

impl HarnessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

/// An addressable target the UI can be navigated to (route/URL).
///
/// Immutable value created by the caller before resolution begins.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Destination(String);

impl Destination {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Destination {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Destination {
    fn from(url: String) -> Self {
        Self(url)
    }
}
