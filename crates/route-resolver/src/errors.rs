//! Error types for route resolution

use driver_bridge::DriverError;
use thiserror::Error;

/// Resolution error enumeration.
///
/// Exhausting the candidate list is NOT an error (see
/// [`crate::ResolutionOutcome::Exhausted`]); these variants cover caller
/// mistakes and infrastructure faults only.
#[derive(Debug, Error, Clone)]
pub enum ResolverError {
    /// The effective candidate list was empty (caller error)
    #[error("No candidate destinations supplied")]
    NoCandidates,

    /// The browsing session became unusable mid-resolution
    #[error("Driver fault during resolution: {0}")]
    Driver(#[from] DriverError),
}
