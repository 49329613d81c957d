//! Docker Engine adapter for the tugbot ticker.
//!
//! [`DockerClient`] implements [`tugbot_core::RuntimeClient`] on top of `bollard`:
//! listing inspects every matching container together with its image, and re-launch
//! creates a fresh, auto-named container from the override-only configuration.
mod config;
pub use config::{DEFAULT_TIMEOUT_SECS, DockerConfig, DockerEndpoint};

mod error;
pub use error::DockerError;

mod convert;

mod client;
pub use client::DockerClient;
