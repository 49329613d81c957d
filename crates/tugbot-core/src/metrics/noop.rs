use crate::metrics::backend::{LaunchOutcome, TickerMetrics};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl TickerMetrics for NoOpMetrics {
    #[inline(always)]
    fn record_tick(&self, _: u64) {}

    #[inline(always)]
    fn record_list_failure(&self) {}

    #[inline(always)]
    fn record_launch(&self, _: LaunchOutcome) {}
}
