mod domain;
pub use domain::{Env, KeySet, Labels};
pub use domain::{
    LABEL_CREATED_FROM, LABEL_STOP_SIGNAL, LABEL_TEST, LABEL_TUGBOT, LABEL_ZODIAC, STATE_EXITED,
};

mod error;
pub use error::{ModelError, ModelResult};

mod container;
pub use container::{
    Container, ContainerConfig, ContainerInfo, HostConfig, ImageInfo, OverrideConfig,
    Passthrough, PortBinding, effective_image_name, has_tag,
};
