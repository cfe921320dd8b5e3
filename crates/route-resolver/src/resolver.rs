//! Candidate probing with early exit

use std::time::Duration;

use driver_bridge::{PageSnapshot, UiDriver};
use panelprobe_core_types::Destination;
use tracing::{debug, info, warn};
use wait_engine::{ProbeResult, WaitEngine};

use crate::errors::ResolverError;
use crate::types::{ResolutionOutcome, ResolveFailure, ResolvePlan};

/// Tries candidate destinations in order and stops at the first arrival.
///
/// Worst-case latency is bounded by `candidates x deadline_per_candidate`:
/// each candidate is tried at most once, with no retry looping beyond the
/// wait engine's internal polling.
pub struct RouteResolver {
    engine: WaitEngine,
    deadline_per_candidate: Duration,
}

impl RouteResolver {
    pub fn new(engine: WaitEngine, deadline_per_candidate: Duration) -> Self {
        Self {
            engine,
            deadline_per_candidate,
        }
    }

    pub async fn resolve<F, P>(
        &self,
        driver: &dyn UiDriver,
        plan: &ResolvePlan,
        arrival_for: F,
    ) -> Result<ResolutionOutcome, ResolverError>
    where
        F: Fn(&Destination) -> P,
        P: Fn(&PageSnapshot) -> bool,
    {
        let candidates = plan.effective_candidates();
        if candidates.is_empty() {
            return Err(ResolverError::NoCandidates);
        }

        let mut attempted = Vec::with_capacity(candidates.len());
        let mut last_failure = None;

        for destination in candidates {
            attempted.push(destination.clone());
            debug!(%destination, "probing candidate destination");

            if let Err(err) = driver.navigate(&destination).await {
                if !err.is_transient() {
                    return Err(ResolverError::Driver(err));
                }
                warn!(%destination, error = %err, "navigation failed, trying next candidate");
                last_failure = Some(ResolveFailure::Navigation {
                    destination,
                    message: err.to_string(),
                });
                continue;
            }

            let predicate = arrival_for(&destination);
            let result = self
                .engine
                .await_ready(
                    || driver.query_ui_state(),
                    |snapshot| predicate(snapshot),
                    self.deadline_per_candidate,
                )
                .await;

            match result {
                ProbeResult::Ready(_) => {
                    info!(%destination, attempts = attempted.len(), "arrived");
                    return Ok(ResolutionOutcome::Arrived(destination));
                }
                ProbeResult::NotYetReady => {
                    debug!(%destination, "candidate did not reach readiness");
                    last_failure = Some(ResolveFailure::Timeout { destination });
                }
                ProbeResult::ProbeError(err) => {
                    return Err(ResolverError::Driver(err));
                }
            }
        }

        warn!(
            attempts = attempted.len(),
            "all candidate destinations exhausted"
        );
        Ok(ResolutionOutcome::Exhausted {
            attempted,
            last_failure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driver_bridge::{DriverError, StubDriver, StubFrame};

    const BASE: &str = "http://localhost:3000";

    fn dest(path: &str) -> Destination {
        Destination::new(format!("{BASE}{path}"))
    }

    fn panel_page(path: &str) -> PageSnapshot {
        PageSnapshot::new(format!("{BASE}{path}"), "Score App").with_heading("Hello, prof")
    }

    fn arrival(_: &Destination) -> impl Fn(&PageSnapshot) -> bool {
        |snapshot: &PageSnapshot| snapshot.heading_contains("Hello,")
    }

    fn resolver() -> RouteResolver {
        RouteResolver::new(
            WaitEngine::new(Duration::from_millis(5)),
            Duration::from_millis(40),
        )
    }

    #[tokio::test]
    async fn first_ready_candidate_wins_in_list_order() {
        let driver = StubDriver::new()
            .with_page(
                format!("{BASE}/ready-too"),
                vec![StubFrame::Snapshot(panel_page("/ready-too"))],
            )
            .with_page(
                format!("{BASE}/panel"),
                vec![StubFrame::Snapshot(panel_page("/panel"))],
            );
        let plan = ResolvePlan::new(vec![dest("/panel"), dest("/ready-too")]);

        let outcome = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap();

        assert_eq!(outcome.arrived(), Some(&dest("/panel")));
        assert_eq!(driver.navigations(), vec![dest("/panel")]);
    }

    #[tokio::test]
    async fn arrives_at_a_candidate_that_becomes_ready_while_polling() {
        // Candidate X never renders, Y renders on the second poll, Z is
        // never attempted.
        let driver = StubDriver::new().with_page(
            format!("{BASE}/y"),
            StubFrame::loading_then(1, panel_page("/y")),
        );
        let plan = ResolvePlan::new(vec![dest("/x"), dest("/y"), dest("/z")]);

        let outcome = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap();

        assert_eq!(outcome.arrived(), Some(&dest("/y")));
        assert_eq!(driver.navigations(), vec![dest("/x"), dest("/y")]);
    }

    #[tokio::test]
    async fn exhaustion_reports_the_full_attempted_list_in_order() {
        let driver = StubDriver::new();
        let plan = ResolvePlan::new(vec![dest("/a"), dest("/b"), dest("/c")]);

        let outcome = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap();

        match outcome {
            ResolutionOutcome::Exhausted {
                attempted,
                last_failure,
            } => {
                assert_eq!(attempted, vec![dest("/a"), dest("/b"), dest("/c")]);
                assert!(matches!(
                    last_failure,
                    Some(ResolveFailure::Timeout { destination }) if destination == dest("/c")
                ));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn override_bypasses_the_candidate_list() {
        let driver = StubDriver::new()
            .with_page(
                format!("{BASE}/pinned"),
                vec![StubFrame::Snapshot(panel_page("/pinned"))],
            )
            .with_page(
                format!("{BASE}/a"),
                vec![StubFrame::Snapshot(panel_page("/a"))],
            );
        let plan = ResolvePlan::new(vec![dest("/a"), dest("/b")])
            .with_override(dest("/pinned"));

        let outcome = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap();

        assert_eq!(outcome.arrived(), Some(&dest("/pinned")));
        assert_eq!(driver.navigations(), vec![dest("/pinned")]);
    }

    #[tokio::test]
    async fn transient_navigation_errors_move_on_to_the_next_candidate() {
        let driver = StubDriver::new()
            .with_navigate_error(
                format!("{BASE}/a"),
                DriverError::NavigationFailed("connection refused".into()),
            )
            .with_page(
                format!("{BASE}/b"),
                vec![StubFrame::Snapshot(panel_page("/b"))],
            );
        let plan = ResolvePlan::new(vec![dest("/a"), dest("/b")]);

        let outcome = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap();

        assert_eq!(outcome.arrived(), Some(&dest("/b")));
    }

    #[tokio::test]
    async fn infrastructure_faults_abort_resolution() {
        let driver = StubDriver::new()
            .with_page(
                format!("{BASE}/a"),
                vec![StubFrame::FatalError("browser crashed".into())],
            )
            .with_page(
                format!("{BASE}/b"),
                vec![StubFrame::Snapshot(panel_page("/b"))],
            );
        let plan = ResolvePlan::new(vec![dest("/a"), dest("/b")]);

        let err = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::Driver(_)));
        // the later candidate was never attempted
        assert_eq!(driver.navigations(), vec![dest("/a")]);
    }

    #[tokio::test]
    async fn empty_plan_fails_fast() {
        let driver = StubDriver::new();
        let plan = ResolvePlan::new(Vec::new());

        let err = resolver()
            .resolve(&driver, &plan, arrival)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::NoCandidates));
        assert!(driver.navigations().is_empty());
    }
}
