//! Container runtime seam used by the ticker.
//!
//! Concrete clients (Docker Engine API, in-memory fakes) implement [`RuntimeClient`].
mod error;
pub use error::RuntimeError;

use async_trait::async_trait;
use tugbot_model::{Container, STATE_EXITED};

/// Lifecycle-state predicate for container discovery.
///
/// Clients talking to a real runtime push the states down as a query filter;
/// in-memory clients call [`Filter::matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    states: Vec<String>,
}

impl Filter {
    /// Select containers in any of the given lifecycle states.
    pub fn states<I, S>(states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            states: states.into_iter().map(Into::into).collect(),
        }
    }

    /// Select stopped containers (state `"exited"`).
    pub fn exited() -> Self {
        Self::states([STATE_EXITED])
    }

    /// States accepted by this filter.
    pub fn state_names(&self) -> &[String] {
        &self.states
    }

    pub fn matches(&self, container: &Container) -> bool {
        self.states.iter().any(|s| s == container.state())
    }
}

/// Runtime operations consumed by the ticker.
///
/// Timeouts are the client's concern: a call that never returns stalls the ticker.
#[async_trait]
pub trait RuntimeClient: Send + Sync {
    /// Inspect every container selected by `filter`. Result ordering is not relied upon.
    async fn list_containers(&self, filter: &Filter) -> Result<Vec<Container>, RuntimeError>;

    /// Create and start a fresh container from `container` using its override config.
    ///
    /// Must fail without touching the runtime if the override config cannot be derived.
    async fn start_container_from(&self, container: &Container) -> Result<(), RuntimeError>;
}
