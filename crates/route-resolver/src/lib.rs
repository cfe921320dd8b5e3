//! Resilient route resolution
//!
//! When the exact deployment path of a screen is unknown, the resolver
//! probes an ordered list of candidate destinations: navigate, wait for the
//! arrival predicate with a bounded deadline, and stop at the first
//! candidate that reaches readiness. Exhaustion is a structured outcome the
//! caller classifies, never an exception.

pub mod errors;
pub mod resolver;
pub mod types;

pub use errors::ResolverError;
pub use resolver::RouteResolver;
pub use types::{ResolutionOutcome, ResolveFailure, ResolvePlan};
