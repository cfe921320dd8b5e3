//! Step and run reporting

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use panelprobe_core_types::RunId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classify::AssertionVerdict;

/// Outcome of one test step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: String,

    /// Position in the declared step order, 1-based
    pub order: u32,

    pub verdict: AssertionVerdict,
    pub latency_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl StepReport {
    pub fn new(step: impl Into<String>, order: u32, verdict: AssertionVerdict, latency_ms: u64) -> Self {
        Self {
            step: step.into(),
            order,
            verdict,
            latency_ms,
            finished_at: Utc::now(),
        }
    }
}

/// Ordered collection of step reports for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Utc::now(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: StepReport) {
        info!(
            step = %step.step,
            verdict = step.verdict.label(),
            latency_ms = step.latency_ms,
            reason = step.verdict.reason().unwrap_or(""),
            "step finished"
        );
        self.steps.push(step);
    }

    /// (passed, failed, skipped) counts
    pub fn counts(&self) -> (usize, usize, usize) {
        let passed = self.steps.iter().filter(|s| s.verdict.is_pass()).count();
        let failed = self.steps.iter().filter(|s| s.verdict.is_fail()).count();
        let skipped = self.steps.iter().filter(|s| s.verdict.is_skip()).count();
        (passed, failed, skipped)
    }

    /// A run passes iff no step failed; skips do not affect it.
    pub fn passed(&self) -> bool {
        !self.steps.iter().any(|s| s.verdict.is_fail())
    }

    pub fn summary(&self) -> String {
        let (passed, failed, skipped) = self.counts();
        let mut out = format!(
            "run {}: {} steps, {} passed, {} failed, {} skipped\n",
            self.run_id.0,
            self.steps.len(),
            passed,
            failed,
            skipped
        );
        for step in &self.steps {
            let _ = write!(
                out,
                "  {}. {:<18} {:<5} ({}ms)",
                step.order,
                step.step,
                step.verdict.label(),
                step.latency_ms
            );
            if let Some(reason) = step.verdict.reason() {
                let _ = write!(out, " - {reason}");
            }
            out.push('\n');
        }
        out
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(verdicts: Vec<AssertionVerdict>) -> RunReport {
        let mut report = RunReport::new();
        for (idx, verdict) in verdicts.into_iter().enumerate() {
            report.record(StepReport::new(
                format!("step-{}", idx + 1),
                (idx + 1) as u32,
                verdict,
                10,
            ));
        }
        report
    }

    #[test]
    fn skips_do_not_affect_pass_status() {
        let report = report_with(vec![
            AssertionVerdict::Pass,
            AssertionVerdict::skip("optional affordance absent"),
        ]);
        assert!(report.passed());
        assert_eq!(report.counts(), (1, 0, 1));
    }

    #[test]
    fn any_fail_marks_the_run_unsuccessful() {
        let report = report_with(vec![
            AssertionVerdict::Pass,
            AssertionVerdict::fail("ranking table headers missing"),
        ]);
        assert!(!report.passed());
        assert!(report.summary().contains("ranking table headers missing"));
    }

    #[test]
    fn reports_serialize_to_json() {
        let report = report_with(vec![AssertionVerdict::Pass]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"verdict\""));
        assert!(json.contains("step-1"));
    }
}
