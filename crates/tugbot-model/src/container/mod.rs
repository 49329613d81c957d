//! Container snapshots and the decisions made over them.
//!
//! A [`Container`] is a value copy of what the runtime reported at inspection time.
//! It never tracks live state: a fresh snapshot is fetched on every polling tick.
mod info;
pub use info::{ContainerConfig, ContainerInfo, HostConfig, ImageInfo, Passthrough, PortBinding};

mod image;
pub use image::{effective_image_name, has_tag};

mod classify;

mod diff;
pub use diff::OverrideConfig;

use crate::{LABEL_STOP_SIGNAL, Labels};

/// Snapshot of a runtime container plus (optionally) the image it was created from.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Bookkeeping flag owned by runtime clients; never read or written by the ticker.
    pub stale: bool,

    info: ContainerInfo,
    image: Option<ImageInfo>,
}

impl Container {
    pub fn new(info: ContainerInfo, image: Option<ImageInfo>) -> Self {
        Self {
            stale: false,
            info,
            image,
        }
    }

    /// Runtime container identifier.
    pub fn id(&self) -> &str {
        &self.info.id
    }

    /// Display name without the leading `/` the runtime adds.
    pub fn name(&self) -> &str {
        self.info.name.trim_start_matches('/')
    }

    /// Identifier of the source image.
    ///
    /// Taken from the image snapshot when present, otherwise from the container record.
    pub fn image_id(&self) -> &str {
        match &self.image {
            Some(image) => &image.id,
            None => &self.info.image,
        }
    }

    /// Logical image name; see [`effective_image_name`].
    pub fn image_name(&self) -> String {
        effective_image_name(&self.info.config.labels, &self.info.config.image)
    }

    /// Names of all linked containers (the part of each link before `:`).
    pub fn links(&self) -> Vec<&str> {
        self.info
            .host_config
            .links
            .iter()
            .map(|link| link.split(':').next().unwrap_or(link))
            .collect()
    }

    pub fn labels(&self) -> &Labels {
        &self.info.config.labels
    }

    /// Lifecycle state string as reported by the runtime.
    pub fn state(&self) -> &str {
        &self.info.state
    }

    /// Custom stop signal from the container labels, or `""` when unset.
    pub fn stop_signal(&self) -> &str {
        self.labels().get(LABEL_STOP_SIGNAL).unwrap_or("")
    }

    pub fn info(&self) -> &ContainerInfo {
        &self.info
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }
}
