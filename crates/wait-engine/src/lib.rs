//! Bounded predicate-driven polling
//!
//! [`WaitEngine`] is the single synchronization primitive the harness is
//! built on. It replaces fixed-delay sleeps with polling: a probe reads the
//! current UI state, a readiness predicate judges it, and the loop repeats
//! on a fixed interval until the predicate holds or the deadline elapses.
//!
//! "Not ready yet" is a first-class value ([`ProbeResult::NotYetReady`]),
//! not caught-and-ignored exception flow. Transient driver errors during a
//! tick are absorbed the same way: absence is an expected state while a page
//! loads. Only infrastructure faults terminate a wait early.

use std::future::Future;
use std::time::Duration;

use driver_bridge::{DriverError, PageSnapshot};
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Outcome of one bounded wait
#[derive(Debug, Clone)]
pub enum ProbeResult {
    /// The predicate held at the last successful probe
    Ready(PageSnapshot),

    /// The deadline elapsed without the predicate holding
    NotYetReady,

    /// An infrastructure fault terminated the wait early
    ProbeError(DriverError),
}

impl ProbeResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeResult::Ready(_))
    }

    pub fn into_snapshot(self) -> Option<PageSnapshot> {
        match self {
            ProbeResult::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Polling wait engine.
///
/// The poll interval is the minimum spacing between probe invocations;
/// values below one millisecond are clamped up to keep the loop from
/// spinning.
#[derive(Debug, Clone)]
pub struct WaitEngine {
    poll_interval: Duration,
}

/// Default spacing between probes. The usual 8s step ceiling divides into
/// 32 sub-polls at this rate.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

impl Default for WaitEngine {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl WaitEngine {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll `probe` until `predicate` accepts a snapshot or `deadline`
    /// elapses.
    ///
    /// Probes run one at a time; an in-flight probe always completes before
    /// a timeout is reported, so total wall-clock is bounded by the deadline
    /// plus one poll interval. A `deadline` of zero still performs exactly
    /// one probe.
    pub async fn await_ready<P, Fut, C>(
        &self,
        mut probe: P,
        predicate: C,
        deadline: Duration,
    ) -> ProbeResult
    where
        P: FnMut() -> Fut,
        Fut: Future<Output = Result<PageSnapshot, DriverError>>,
        C: Fn(&PageSnapshot) -> bool,
    {
        let started = Instant::now();
        let mut ticks: u32 = 0;

        loop {
            ticks += 1;
            match probe().await {
                Ok(snapshot) => {
                    if predicate(&snapshot) {
                        debug!(ticks, elapsed_ms = started.elapsed().as_millis() as u64, "predicate satisfied");
                        return ProbeResult::Ready(snapshot);
                    }
                }
                Err(err) if err.is_transient() => {
                    debug!(ticks, error = %err, "transient probe error, treating as not ready");
                }
                Err(err) => {
                    warn!(ticks, error = %err, "infrastructure fault during wait");
                    return ProbeResult::ProbeError(err);
                }
            }

            if started.elapsed() >= deadline {
                warn!(
                    ticks,
                    deadline_ms = deadline.as_millis() as u64,
                    "wait deadline elapsed"
                );
                return ProbeResult::NotYetReady;
            }

            sleep(self.poll_interval).await;
        }
    }
}
