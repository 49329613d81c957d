use thiserror::Error;

use crate::runtime::RuntimeError;

/// Failures observed during a single tick.
///
/// None of these stop the ticker: they are logged and counted, then the loop moves on.
#[derive(Debug, Error)]
pub enum TickError {
    /// Discovery call failed; the rest of the tick is skipped.
    #[error("failed to list containers: {0}")]
    ListFailure(#[source] RuntimeError),

    /// Re-launch of one candidate failed; other candidates are unaffected.
    #[error("failed to start container from '{container}': {source}")]
    LaunchFailure {
        container: String,
        #[source]
        source: RuntimeError,
    },

    /// Candidate had no image snapshot, so no override config could be derived.
    #[error("container '{container}' has no image metadata; launch skipped")]
    MissingImageMetadata { container: String },
}

impl TickError {
    /// Classify a failed launch of `container`.
    pub fn launch(container: &str, source: RuntimeError) -> Self {
        if source.is_missing_image_metadata() {
            TickError::MissingImageMetadata {
                container: container.to_string(),
            }
        } else {
            TickError::LaunchFailure {
                container: container.to_string(),
                source,
            }
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TickError::ListFailure(_) => "list_failure",
            TickError::LaunchFailure { .. } => "launch_failure",
            TickError::MissingImageMetadata { .. } => "missing_image_metadata",
        }
    }
}
