//! Override-only launch configuration.
//!
//! Inspect output merges image defaults with whatever was given at `run` time.
//! Re-submitting that merged config would pin the image defaults onto the new
//! container, so every value equal to the image default is stripped first.
//! Everything the diff does not cover (tty, hostname, binds, network mode, ...)
//! is re-submitted as recorded.
use crate::{Container, ContainerConfig, HostConfig, ModelError, ModelResult};

/// Launch configuration for re-creating a container from its original image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideConfig {
    /// Recorded options with values equal to the image defaults cleared; `image` is the
    /// effective image name. Options outside the diff are carried over unchanged.
    pub config: ContainerConfig,
    /// Recorded host options with links rewritten for the create API.
    pub host_config: HostConfig,
}

impl Container {
    /// Compute the override-only configuration used to re-launch this container.
    ///
    /// Fails with [`ModelError::MissingImageMetadata`] when there is no image snapshot
    /// to subtract defaults from; nothing must be launched in that case.
    pub fn override_config(&self) -> ModelResult<OverrideConfig> {
        let image = self
            .image()
            .ok_or_else(|| ModelError::MissingImageMetadata {
                container: self.name().to_string(),
            })?;
        let defaults = &image.config;
        let current = &self.info().config;

        let mut config = current.clone();
        config.image = self.image_name();
        config.working_dir = unless_default(&current.working_dir, &defaults.working_dir);
        config.user = unless_default(&current.user, &defaults.user);
        config.cmd = unless_same_sequence(&current.cmd, &defaults.cmd);
        config.entrypoint = unless_same_sequence(&current.entrypoint, &defaults.entrypoint);
        config.env = current.env.subtract(&defaults.env);
        config.labels = current.labels.subtract(&defaults.labels);
        config.volumes = current.volumes.subtract(&defaults.volumes);
        config.exposed_ports = current.exposed_ports.subtract(&defaults.exposed_ports);
        for port in self.info().host_config.port_bindings.keys() {
            config.exposed_ports.insert(port.clone());
        }

        let mut host_config = self.info().host_config.clone();
        for link in &mut host_config.links {
            *link = rewrite_link(link);
        }

        Ok(OverrideConfig {
            config,
            host_config,
        })
    }
}

fn unless_default(value: &Option<String>, default: &Option<String>) -> Option<String> {
    let value = value.as_deref().unwrap_or("");
    if value == default.as_deref().unwrap_or("") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Absent and empty sequences compare equal.
fn unless_same_sequence(
    value: &Option<Vec<String>>,
    default: &Option<Vec<String>>,
) -> Option<Vec<String>> {
    let value = value.as_deref().unwrap_or_default();
    if value == default.as_deref().unwrap_or_default() {
        None
    } else {
        Some(value.to_vec())
    }
}

/// `"/db:/web/db"` becomes `"/db:db"`: the create API wants a short alias.
fn rewrite_link(link: &str) -> String {
    let (name, alias) = link.split_once(':').unwrap_or((link, link));
    let alias = alias.rsplit('/').next().unwrap_or(alias);
    format!("{name}:{alias}")
}
