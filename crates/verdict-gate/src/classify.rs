//! The classification policy

use serde::{Deserialize, Serialize};

/// Classified result of one test assertion.
///
/// `Fail` is the only verdict that marks the overall run unsuccessful;
/// `Skip` is reported but does not count as a defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssertionVerdict {
    Pass,
    Fail { reason: String },
    Skip { reason: String },
}

impl AssertionVerdict {
    pub fn fail(reason: impl Into<String>) -> Self {
        Self::Fail {
            reason: reason.into(),
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip {
            reason: reason.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, AssertionVerdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, AssertionVerdict::Fail { .. })
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, AssertionVerdict::Skip { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            AssertionVerdict::Pass => None,
            AssertionVerdict::Fail { reason } | AssertionVerdict::Skip { reason } => Some(reason),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssertionVerdict::Pass => "pass",
            AssertionVerdict::Fail { .. } => "fail",
            AssertionVerdict::Skip { .. } => "skip",
        }
    }
}

/// Classify one assertion.
///
/// A false `precondition` yields `Skip(reason)` and `check` is never
/// invoked. A true precondition yields `Pass` or `Fail(reason)` matching
/// `check` exactly.
pub fn classify<P, C>(precondition: P, check: C, reason: impl Into<String>) -> AssertionVerdict
where
    P: FnOnce() -> bool,
    C: FnOnce() -> bool,
{
    if !precondition() {
        return AssertionVerdict::skip(reason);
    }
    if check() {
        AssertionVerdict::Pass
    } else {
        AssertionVerdict::fail(reason)
    }
}

/// Skip because a required precondition did not hold.
pub fn skip_precondition(reason: impl Into<String>) -> AssertionVerdict {
    classify(|| false, || false, reason)
}

/// Pass/fail on an already-evaluated check under a satisfied precondition.
pub fn require(check: bool, reason: impl Into<String>) -> AssertionVerdict {
    classify(|| true, move || check, reason)
}
