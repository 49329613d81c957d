use std::sync::Arc;

use crate::TickError;

/// Result of a single candidate launch, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Container created and started.
    Launched,
    /// Runtime refused or failed the launch.
    Failed,
    /// No image snapshot; nothing was submitted.
    MissingImage,
}

impl LaunchOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchOutcome::Launched => "launched",
            LaunchOutcome::Failed => "failed",
            LaunchOutcome::MissingImage => "missing_image",
        }
    }

    /// Outcome of a failed launch.
    pub fn from_error(err: &TickError) -> Self {
        match err {
            TickError::MissingImageMetadata { .. } => LaunchOutcome::MissingImage,
            _ => LaunchOutcome::Failed,
        }
    }
}

/// Backend metrics collection interface.
pub trait TickerMetrics: Send + Sync + 'static {
    /// Record a finished tick and how long it took.
    ///
    /// Called for every tick that reached the runtime, including ones whose list call failed.
    fn record_tick(&self, duration_ms: u64);
    /// Record a failed discovery call.
    fn record_list_failure(&self);
    /// Record the outcome of one candidate launch.
    fn record_launch(&self, outcome: LaunchOutcome);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn TickerMetrics>;
