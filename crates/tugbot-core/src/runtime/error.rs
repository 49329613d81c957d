use thiserror::Error;

use tugbot_model::ModelError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime api error: {0}")]
    Api(String),

    #[error("runtime unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl RuntimeError {
    /// Returns `true` if the call was refused because the container has no image snapshot.
    pub fn is_missing_image_metadata(&self) -> bool {
        matches!(self, RuntimeError::Model(ModelError::MissingImageMetadata { .. }))
    }
}
