//! Polling driver that re-launches finished test containers.
//!
//! The ticker has two states, running and stopped; cancelling its token is the only
//! way to move from one to the other. Cancellation is observed while waiting for the
//! next tick, while waiting for the list call, and between candidates, so shutdown is
//! delayed by at most one in-flight launch call.
mod report;
pub use report::TickReport;

use std::{fmt, sync::Arc, time::Duration};

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    error::TickError,
    metrics::{LaunchOutcome, MetricsHandle, noop_metrics},
    runtime::{Filter, RuntimeClient},
};

/// Smallest accepted interval; a zero interval is raised to this value.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Run the ticker until `cancel` fires.
///
/// The first tick fires immediately, then every `interval`. Errors from listing or
/// launching are logged and never end the loop.
pub async fn run_ticker_test_containers(
    cancel: CancellationToken,
    client: Arc<dyn RuntimeClient>,
    interval: Duration,
) {
    Ticker::new(client, interval).run(cancel).await
}

/// Periodic discovery-and-launch loop over a [`RuntimeClient`].
#[derive(Clone)]
pub struct Ticker {
    client: Arc<dyn RuntimeClient>,
    interval: Duration,
    filter: Filter,
    metrics: MetricsHandle,
}

impl Ticker {
    /// Create a ticker that lists exited containers every `interval`.
    pub fn new(client: Arc<dyn RuntimeClient>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("zero tick interval requested, using {:?}", MIN_TICK_INTERVAL);
            MIN_TICK_INTERVAL
        } else {
            interval
        };
        Self {
            client,
            interval,
            filter: Filter::exited(),
            metrics: noop_metrics(),
        }
    }

    /// Replace the metrics backend and return updated ticker.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run ticks until `cancel` fires.
    #[instrument(level = "debug", skip_all, fields(interval_ms = self.interval.as_millis() as u64))]
    pub async fn run(&self, cancel: CancellationToken) {
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("test container ticker started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = timer.tick() => {}
            }

            let report = self.tick(&cancel).await;
            debug!(
                listed = report.listed,
                candidates = report.candidates,
                launched = report.launched,
                failed = report.failed,
                "tick finished"
            );
            if report.interrupted {
                break;
            }
        }
        info!("test container ticker stopped");
    }

    /// Perform one discovery-and-launch pass.
    ///
    /// Candidates are launched one at a time, in the order the runtime returned them.
    pub async fn tick(&self, cancel: &CancellationToken) -> TickReport {
        let started = Instant::now();
        let mut report = TickReport::default();

        let listed = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                report.interrupted = true;
                return report;
            }
            res = self.client.list_containers(&self.filter) => res,
        };

        let containers = match listed {
            Ok(containers) => containers,
            Err(e) => {
                let err = TickError::ListFailure(e);
                warn!(error = %err, kind = err.kind(), "skipping tick");
                report.list_failed = true;
                self.metrics.record_list_failure();
                self.metrics.record_tick(elapsed_ms(started));
                return report;
            }
        };
        report.listed = containers.len();

        for container in &containers {
            if container.is_agent_self() {
                trace!(container = container.name(), "skipping agent container");
                continue;
            }
            if !container.is_candidate() {
                continue;
            }
            if cancel.is_cancelled() {
                report.interrupted = true;
                break;
            }

            report.candidates += 1;
            match self.client.start_container_from(container).await {
                Ok(()) => {
                    report.launched += 1;
                    info!(
                        container = container.name(),
                        image = %container.image_name(),
                        "test container started"
                    );
                    self.metrics.record_launch(LaunchOutcome::Launched);
                }
                Err(e) => {
                    report.failed += 1;
                    let err = TickError::launch(container.name(), e);
                    warn!(container = container.name(), kind = err.kind(), error = %err, "launch failed");
                    self.metrics.record_launch(LaunchOutcome::from_error(&err));
                }
            }
        }

        self.metrics.record_tick(elapsed_ms(started));
        report
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticker")
            .field("interval", &self.interval)
            .field("filter", &self.filter)
            .field("client", &"<runtime>")
            .field("metrics", &"<handle>")
            .finish()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use tugbot_model::Container;

    use crate::RuntimeError;

    struct Unreachable;

    #[async_trait]
    impl RuntimeClient for Unreachable {
        async fn list_containers(&self, _: &Filter) -> Result<Vec<Container>, RuntimeError> {
            Err(RuntimeError::Unavailable("no socket".into()))
        }

        async fn start_container_from(&self, _: &Container) -> Result<(), RuntimeError> {
            unreachable!("nothing is listed")
        }
    }

    #[test]
    fn zero_interval_is_clamped() {
        let ticker = Ticker::new(Arc::new(Unreachable), Duration::ZERO);
        assert_eq!(ticker.interval(), MIN_TICK_INTERVAL);
    }

    #[test]
    fn debug_hides_handles() {
        let ticker = Ticker::new(Arc::new(Unreachable), Duration::from_secs(10));
        let s = format!("{ticker:?}");
        assert!(s.contains("interval: 10s"));
        assert!(s.contains("<runtime>"));
    }

    #[tokio::test]
    async fn list_failure_is_reported() {
        let ticker = Ticker::new(Arc::new(Unreachable), Duration::from_secs(10));
        let report = ticker.tick(&CancellationToken::new()).await;

        assert!(report.list_failed);
        assert!(!report.interrupted);
        assert_eq!(report.listed, 0);
    }

    #[tokio::test]
    async fn cancelled_token_skips_listing() {
        let ticker = Ticker::new(Arc::new(Unreachable), Duration::from_secs(10));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = ticker.tick(&cancel).await;
        assert!(report.interrupted);
        assert!(!report.list_failed);
    }
}
