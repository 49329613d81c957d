use std::collections::HashMap;

use async_trait::async_trait;
use bollard::{
    API_DEFAULT_VERSION, Docker,
    container::{
        Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions,
        RemoveContainerOptions, StartContainerOptions,
    },
};
use tracing::{debug, instrument, warn};

use tugbot_core::{Filter, RuntimeClient, RuntimeError};
use tugbot_model::{Container, LABEL_CREATED_FROM};

use crate::{DockerConfig, DockerEndpoint, DockerError, convert};

/// [`RuntimeClient`] backed by the Docker Engine API.
#[derive(Debug, Clone)]
pub struct DockerClient {
    docker: Docker,
    endpoint: DockerEndpoint,
}

impl DockerClient {
    /// Build a client for the configured endpoint. No request is made yet.
    pub fn connect(cfg: &DockerConfig) -> Result<Self, DockerError> {
        let endpoint = cfg.endpoint()?;
        let docker = match &endpoint {
            DockerEndpoint::Local => Docker::connect_with_local_defaults(),
            DockerEndpoint::UnixSocket(path) => {
                Docker::connect_with_unix(path, cfg.timeout_secs, API_DEFAULT_VERSION)
            }
            DockerEndpoint::Http(addr) => {
                Docker::connect_with_http(addr, cfg.timeout_secs, API_DEFAULT_VERSION)
            }
        }
        .map_err(|source| DockerError::Connect {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(Self { docker, endpoint })
    }

    /// Check that the engine answers.
    pub async fn ping(&self) -> Result<(), DockerError> {
        self.docker
            .ping()
            .await
            .map_err(|source| DockerError::Connect {
                endpoint: self.endpoint.to_string(),
                source,
            })?;
        debug!(endpoint = %self.endpoint, "docker engine reachable");
        Ok(())
    }

    pub fn endpoint(&self) -> &DockerEndpoint {
        &self.endpoint
    }

    async fn inspect(&self, id: &str) -> Result<Container, DockerError> {
        let resp = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| DockerError::op("inspect container", id, e))?;
        let info = convert::container_info(resp)?;

        // an image that cannot be inspected leaves the container without a snapshot;
        // it is still listed, and re-launch refuses it later
        let image = match self.docker.inspect_image(&info.image).await {
            Ok(resp) => match convert::image_info(resp) {
                Ok(image) => Some(image),
                Err(err) => {
                    warn!(container = %info.name, image = %info.image, error = %err, "image config unreadable");
                    None
                }
            },
            Err(err) => {
                warn!(container = %info.name, image = %info.image, error = %err, "image inspect failed");
                None
            }
        };

        Ok(Container::new(info, image))
    }
}

#[async_trait]
impl RuntimeClient for DockerClient {
    #[instrument(level = "debug", skip(self))]
    async fn list_containers(&self, filter: &Filter) -> Result<Vec<Container>, RuntimeError> {
        let summaries = self
            .docker
            .list_containers(Some(list_options(filter)))
            .await
            .map_err(|e| DockerError::op("list", "containers", e))?;

        let mut containers = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let Some(id) = summary.id else {
                return Err(DockerError::Incomplete {
                    operation: "list containers",
                    field: "id",
                }
                .into());
            };
            match self.inspect(&id).await {
                Ok(container) => containers.push(container),
                // removed between list and inspect, e.g. a `--rm` container
                Err(err) if err.is_not_found() => {
                    warn!(id = %id, error = %err, "container vanished before inspect");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(containers)
    }

    #[instrument(level = "debug", skip(self, container), fields(source = %container.name()))]
    async fn start_container_from(&self, container: &Container) -> Result<(), RuntimeError> {
        let config = launch_config(container)?;

        let created = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, config)
            .await
            .map_err(|e| DockerError::op("create from", container.name(), e))?;
        for warning in &created.warnings {
            warn!(id = %created.id, %warning, "create warning");
        }

        let id = created.id.as_str();
        start_or_remove(
            id,
            async {
                self.docker
                    .start_container(id, None::<StartContainerOptions<String>>)
                    .await
                    .map_err(|e| DockerError::op("start", id, e))
            },
            || async {
                let opts = RemoveContainerOptions {
                    force: true,
                    ..Default::default()
                };
                self.docker
                    .remove_container(id, Some(opts))
                    .await
                    .map_err(|e| DockerError::op("remove", id, e))
            },
        )
        .await?;

        debug!(id = %id, "container started");
        Ok(())
    }
}

fn list_options(filter: &Filter) -> ListContainersOptions<String> {
    ListContainersOptions {
        all: true,
        filters: HashMap::from([("status".to_string(), filter.state_names().to_vec())]),
        ..Default::default()
    }
}

/// Create request for a re-launch of `container`, tagged with its origin.
fn launch_config(container: &Container) -> Result<Config<String>, RuntimeError> {
    let mut ovr = container.override_config()?;
    ovr.config
        .labels
        .insert(LABEL_CREATED_FROM, container.name());
    Ok(convert::create_config(&ovr)?)
}

/// Start a freshly created container, removing it again if it does not start.
///
/// A leftover would carry `tugbot.created.from` and never be looked at again. The start
/// error is returned either way; a failed removal is only logged.
async fn start_or_remove<S, R, RF>(id: &str, start: S, remove: R) -> Result<(), DockerError>
where
    S: Future<Output = Result<(), DockerError>>,
    R: FnOnce() -> RF,
    RF: Future<Output = Result<(), DockerError>>,
{
    let Err(err) = start.await else {
        return Ok(());
    };
    match remove().await {
        Ok(()) => debug!(id, "removed container that failed to start"),
        Err(remove_err) => {
            warn!(id, error = %remove_err, "failed to remove container that did not start")
        }
    }
    Err(err)
}
