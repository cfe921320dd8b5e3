//! Step runner
//!
//! Resolves the panel route once, then executes the declared steps in
//! order, passing the UI-state handle forward. Resolution exhaustion skips
//! every step; an infrastructure fault aborts the remaining steps. The
//! session is disposed exactly once on every path.

use std::sync::Arc;
use std::time::Instant;

use driver_bridge::{DriverError, PageSnapshot, UiDriver};
use panelprobe_core_types::HarnessError;
use route_resolver::{ResolutionOutcome, ResolverError, RouteResolver};
use tracing::{info, warn};
use verdict_gate::{RunReport, StepReport};
use wait_engine::WaitEngine;

use crate::config::HarnessConfig;
use crate::session::ScopedSession;
use crate::suite::{panel_arrival, PanelState, PanelSuite};

pub async fn run_suite(
    config: &HarnessConfig,
    driver: Arc<dyn UiDriver>,
) -> Result<RunReport, HarnessError> {
    let session = ScopedSession::new(driver);
    info!(
        session = %session.id().0,
        base_url = %config.base_url,
        "starting professor panel acceptance run"
    );

    let result = run_steps(config, session.driver()).await;

    if let Err(err) = session.dispose().await {
        warn!(error = %err, "session disposal failed");
    }

    result
}

async fn run_steps(
    config: &HarnessConfig,
    driver: &dyn UiDriver,
) -> Result<RunReport, HarnessError> {
    let engine = WaitEngine::new(config.poll_interval);
    let resolver = RouteResolver::new(engine.clone(), config.wait_ceiling);
    let plan = config.resolve_plan();

    let resolution = resolver
        .resolve(driver, &plan, |_| panel_arrival())
        .await
        .map_err(|err| match err {
            ResolverError::NoCandidates => {
                HarnessError::new("no candidate destinations configured")
            }
            ResolverError::Driver(err) => infrastructure_fault("route resolution", &err),
        })?;

    let mut state = match &resolution {
        ResolutionOutcome::Arrived(destination) => {
            info!(%destination, "professor panel reached");
            let snapshot = initial_snapshot(driver)
                .await
                .map_err(|err| infrastructure_fault("initial snapshot", &err))?;
            Some(PanelState {
                destination: destination.clone(),
                snapshot,
            })
        }
        ResolutionOutcome::Exhausted { .. } => {
            warn!(
                outcome = %resolution.describe(),
                "professor panel not reachable, steps will be skipped"
            );
            None
        }
    };

    let suite = PanelSuite::new(engine, config.wait_ceiling);
    let mut report = RunReport::new();

    for (index, name) in PanelSuite::STEPS.iter().enumerate() {
        let started = Instant::now();
        let verdict = suite
            .run_step(driver, name, &mut state, &resolution)
            .await
            .map_err(|err| infrastructure_fault(name, &err))?;
        report.record(StepReport::new(
            *name,
            (index + 1) as u32,
            verdict,
            started.elapsed().as_millis() as u64,
        ));
    }

    Ok(report)
}

/// One snapshot right after arrival seeds the state handle. Transient
/// absence is fine here; steps re-probe anyway.
async fn initial_snapshot(driver: &dyn UiDriver) -> Result<PageSnapshot, DriverError> {
    match driver.query_ui_state().await {
        Ok(snapshot) => Ok(snapshot),
        Err(err) if err.is_transient() => Ok(PageSnapshot::default()),
        Err(err) => Err(err),
    }
}

fn infrastructure_fault(context: &str, err: &DriverError) -> HarnessError {
    HarnessError::new(format!(
        "infrastructure fault during {context}: {err}; aborting remaining steps"
    ))
}
