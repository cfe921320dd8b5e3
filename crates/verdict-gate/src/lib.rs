//! Skip-vs-fail assertion classification
//!
//! A test step against a live UI can be inconclusive for two very different
//! reasons: the environment legitimately lacks an optional affordance
//! (skip), or the UI violated a required invariant (fail). Both paths are
//! reachable via the same "element not found" signal from the underlying
//! driver, so the distinction is made explicit here as a policy over a
//! precondition and a check, rather than inferred from error types.

pub mod classify;
pub mod report;

pub use classify::{classify, require, skip_precondition, AssertionVerdict};
pub use report::{RunReport, StepReport};
