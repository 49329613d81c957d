//! Metrics collection abstraction for the ticker.
//!
//! Backends (prometheus, statsd, etc) implement [`TickerMetrics`] and are injected via [`crate::Ticker::with_metrics`].
mod backend;
pub use backend::{LaunchOutcome, MetricsHandle, TickerMetrics};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
