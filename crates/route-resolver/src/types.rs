//! Core types for route resolution

use std::fmt;

use panelprobe_core_types::Destination;
use serde::{Deserialize, Serialize};

/// Resolution input: the ordered candidate list, plus an optional pinned
/// override.
///
/// When an override is present the plan short-circuits to exactly that one
/// destination, bypassing probing of the list entirely - the caller knows
/// the good route and pins it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePlan {
    candidates: Vec<Destination>,
    override_destination: Option<Destination>,
}

impl ResolvePlan {
    pub fn new(candidates: Vec<Destination>) -> Self {
        Self {
            candidates,
            override_destination: None,
        }
    }

    pub fn with_override(mut self, destination: Destination) -> Self {
        self.override_destination = Some(destination);
        self
    }

    pub fn override_destination(&self) -> Option<&Destination> {
        self.override_destination.as_ref()
    }

    /// The destinations resolution will actually try, in order.
    pub fn effective_candidates(&self) -> Vec<Destination> {
        match &self.override_destination {
            Some(pinned) => vec![pinned.clone()],
            None => self.candidates.clone(),
        }
    }
}

/// What went wrong at one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolveFailure {
    /// Arrival predicate did not hold within the per-candidate deadline
    Timeout { destination: Destination },

    /// Navigation itself failed transiently
    Navigation {
        destination: Destination,
        message: String,
    },
}

impl fmt::Display for ResolveFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveFailure::Timeout { destination } => {
                write!(f, "timed out waiting for readiness at {destination}")
            }
            ResolveFailure::Navigation {
                destination,
                message,
            } => write!(f, "navigation to {destination} failed: {message}"),
        }
    }
}

/// Result of one resolution attempt. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ResolutionOutcome {
    /// The first candidate whose arrival predicate held
    Arrived(Destination),

    /// Every candidate was tried once, none reached readiness
    Exhausted {
        /// Candidates attempted, in input order
        attempted: Vec<Destination>,

        /// Last observed timeout or navigation failure, for diagnostics
        last_failure: Option<ResolveFailure>,
    },
}

impl ResolutionOutcome {
    pub fn is_arrived(&self) -> bool {
        matches!(self, ResolutionOutcome::Arrived(_))
    }

    pub fn arrived(&self) -> Option<&Destination> {
        match self {
            ResolutionOutcome::Arrived(destination) => Some(destination),
            ResolutionOutcome::Exhausted { .. } => None,
        }
    }

    /// Human-readable account for skip/fail messages.
    pub fn describe(&self) -> String {
        match self {
            ResolutionOutcome::Arrived(destination) => format!("arrived at {destination}"),
            ResolutionOutcome::Exhausted {
                attempted,
                last_failure,
            } => {
                let tried = attempted
                    .iter()
                    .map(Destination::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                match last_failure {
                    Some(failure) => format!("attempted [{tried}]; last failure: {failure}"),
                    None => format!("attempted [{tried}]"),
                }
            }
        }
    }
}
