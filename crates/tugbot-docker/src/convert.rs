//! Mapping between `bollard` wire models and the runtime-neutral model types.
//!
//! Config sections go through their Engine API JSON shape, which both sides share, so
//! options the model does not interpret are carried through untouched.
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use bollard::{
    container::Config,
    models::{ContainerInspectResponse, ImageInspect},
};

use tugbot_model::{ContainerInfo, ImageInfo, OverrideConfig};

use crate::DockerError;

pub(crate) fn container_info(resp: ContainerInspectResponse) -> Result<ContainerInfo, DockerError> {
    let state = resp
        .state
        .and_then(|s| s.status)
        .map(|status| status.to_string())
        .unwrap_or_default();

    Ok(ContainerInfo {
        id: resp.id.unwrap_or_default(),
        name: resp.name.unwrap_or_default(),
        image: resp.image.unwrap_or_default(),
        state,
        config: section("container config", resp.config.as_ref())?,
        host_config: section("host config", resp.host_config.as_ref())?,
    })
}

pub(crate) fn image_info(resp: ImageInspect) -> Result<ImageInfo, DockerError> {
    Ok(ImageInfo {
        id: resp.id.unwrap_or_default(),
        config: section("image config", resp.config.as_ref())?,
    })
}

/// Build the create request for a re-launch.
pub(crate) fn create_config(ovr: &OverrideConfig) -> Result<Config<String>, DockerError> {
    let mut body = to_wire("create config", &ovr.config)?;
    let host = to_wire("host config", &ovr.host_config)?;
    if let Value::Object(fields) = &mut body {
        fields.insert("HostConfig".to_string(), host);
    }
    serde_json::from_value(body).map_err(|source| DockerError::Wire {
        what: "create config",
        source,
    })
}

fn section<S, T>(what: &'static str, wire: Option<&S>) -> Result<T, DockerError>
where
    S: Serialize,
    T: DeserializeOwned + Default,
{
    let Some(wire) = wire else {
        return Ok(T::default());
    };
    serde_json::from_value(to_wire(what, wire)?)
        .map_err(|source| DockerError::Wire { what, source })
}

fn to_wire<S: Serialize>(what: &'static str, value: &S) -> Result<Value, DockerError> {
    serde_json::to_value(value).map_err(|source| DockerError::Wire { what, source })
}
