use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DockerError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the Docker Engine API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Engine address: `unix:///path`, a bare socket path, or `tcp://host:port`.
    /// Unset means the local defaults (`DOCKER_HOST` or the platform socket).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl DockerConfig {
    /// Resolve the configured host into an endpoint.
    pub fn endpoint(&self) -> Result<DockerEndpoint, DockerError> {
        let Some(host) = self.host.as_deref().map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(DockerEndpoint::Local);
        };

        if let Some(path) = host.strip_prefix("unix://") {
            return Ok(DockerEndpoint::UnixSocket(path.to_string()));
        }
        if host.starts_with('/') {
            return Ok(DockerEndpoint::UnixSocket(host.to_string()));
        }
        if let Some(addr) = host.strip_prefix("tcp://") {
            return Ok(DockerEndpoint::Http(format!("http://{addr}")));
        }
        if host.starts_with("http://") {
            return Ok(DockerEndpoint::Http(host.to_string()));
        }
        Err(DockerError::InvalidHost(host.to_string()))
    }
}

/// Where the engine lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    Local,
    UnixSocket(String),
    Http(String),
}

impl fmt::Display for DockerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerEndpoint::Local => f.write_str("local defaults"),
            DockerEndpoint::UnixSocket(path) => write!(f, "unix://{path}"),
            DockerEndpoint::Http(addr) => f.write_str(addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_host(host: &str) -> DockerConfig {
        DockerConfig {
            host: Some(host.into()),
            ..Default::default()
        }
    }

    #[test]
    fn unset_or_blank_host_means_local_defaults() {
        assert_eq!(DockerConfig::default().endpoint().unwrap(), DockerEndpoint::Local);
        assert_eq!(with_host("  ").endpoint().unwrap(), DockerEndpoint::Local);
    }

    #[test]
    fn socket_paths_are_accepted_with_or_without_scheme() {
        assert_eq!(
            with_host("unix:///var/run/docker.sock").endpoint().unwrap(),
            DockerEndpoint::UnixSocket("/var/run/docker.sock".into())
        );
        assert_eq!(
            with_host("/run/user/1000/podman/podman.sock").endpoint().unwrap(),
            DockerEndpoint::UnixSocket("/run/user/1000/podman/podman.sock".into())
        );
    }

    #[test]
    fn tcp_is_mapped_to_http() {
        assert_eq!(
            with_host("tcp://10.0.0.5:2375").endpoint().unwrap(),
            DockerEndpoint::Http("http://10.0.0.5:2375".into())
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(matches!(
            with_host("ssh://box").endpoint(),
            Err(DockerError::InvalidHost(h)) if h == "ssh://box"
        ));
    }

    #[test]
    fn partial_config_keeps_default_timeout() {
        let cfg: DockerConfig = serde_json::from_str(r#"{"host": "tcp://h:2375"}"#).unwrap();
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.host.as_deref(), Some("tcp://h:2375"));
    }
}
