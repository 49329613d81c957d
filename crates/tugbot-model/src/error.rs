use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("container '{container}' has no image metadata to diff against")]
    MissingImageMetadata { container: String },
}

pub type ModelResult<T> = Result<T, ModelError>;
