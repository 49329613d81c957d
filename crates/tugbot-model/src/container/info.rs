use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Env, KeySet, Labels};

/// Wire fields the model does not interpret, kept verbatim (e.g. `Tty`, `Hostname`, `Binds`).
pub type Passthrough = BTreeMap<String, serde_json::Value>;

/// Launch options recorded on a container or declared as defaults by an image.
///
/// Serde follows the Engine API (`Config` section of inspect output). The same shape is
/// used for both sides of the diff: the container's merged runtime configuration and the
/// image's built-in defaults.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerConfig {
    /// Image reference the container was created from (e.g. `"alpine:3.20"`).
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmd: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Env::is_empty", deserialize_with = "null_as_default")]
    pub env: Env,
    #[serde(skip_serializing_if = "Labels::is_empty", deserialize_with = "null_as_default")]
    pub labels: Labels,
    #[serde(skip_serializing_if = "KeySet::is_empty", deserialize_with = "null_as_default")]
    pub volumes: KeySet,
    #[serde(skip_serializing_if = "KeySet::is_empty", deserialize_with = "null_as_default")]
    pub exposed_ports: KeySet,
    /// Everything else recorded for the container; re-submitted unchanged.
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Host-side port binding for a container port.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PortBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_port: Option<String>,
}

/// Host-level options that travel with a container across re-creation.
///
/// Serde follows the `HostConfig` section of inspect output.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    /// Legacy links as reported by inspect, e.g. `"/db:/web/db"`.
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub links: Vec<String>,
    /// Container port (`"8080/tcp"`) to host bindings.
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "port_bindings"
    )]
    pub port_bindings: BTreeMap<String, Vec<PortBinding>>,
    /// Binds, network mode, restart policy and every other host option.
    #[serde(flatten)]
    pub extra: Passthrough,
}

/// Result of inspecting a container.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ContainerInfo {
    pub id: String,
    /// Name as reported by the runtime, usually with a leading `/`.
    pub name: String,
    /// Identifier of the image the container runs (`sha256:...`).
    pub image: String,
    /// Lifecycle state string (`"created"`, `"running"`, `"exited"`, ...).
    pub state: String,
    pub config: ContainerConfig,
    pub host_config: HostConfig,
}

/// Result of inspecting an image: its identifier and default configuration.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub id: String,
    pub config: ContainerConfig,
}

/// The Engine API reports empty collections as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn port_bindings<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<PortBinding>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<Vec<PortBinding>>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(port, bindings)| (port, bindings.unwrap_or_default()))
        .collect())
}
