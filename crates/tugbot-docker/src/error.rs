use thiserror::Error;

use tugbot_core::RuntimeError;

#[derive(Debug, Error)]
pub enum DockerError {
    #[error("invalid docker host: {0} (expected unix://, tcp:// or a socket path)")]
    InvalidHost(String),

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("{operation} {target} failed: {source}")]
    Operation {
        operation: &'static str,
        target: String,
        #[source]
        source: bollard::errors::Error,
    },

    #[error("malformed {what}: {source}")]
    Wire {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} returned no {field}")]
    Incomplete {
        operation: &'static str,
        field: &'static str,
    },
}

impl DockerError {
    pub(crate) fn op(operation: &'static str, target: &str, source: bollard::errors::Error) -> Self {
        DockerError::Operation {
            operation,
            target: target.to_string(),
            source,
        }
    }

    /// Returns `true` if the engine reported the target as gone.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DockerError::Operation {
                source: bollard::errors::Error::DockerResponseServerError {
                    status_code: 404,
                    ..
                },
                ..
            }
        )
    }
}

impl From<DockerError> for RuntimeError {
    fn from(err: DockerError) -> Self {
        match err {
            DockerError::Operation {
                source: bollard::errors::Error::DockerResponseServerError { .. },
                ..
            }
            | DockerError::InvalidHost(_)
            | DockerError::Wire { .. }
            | DockerError::Incomplete { .. } => RuntimeError::Api(err.to_string()),
            DockerError::Connect { .. } | DockerError::Operation { .. } => {
                RuntimeError::Unavailable(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_refusals_are_api_errors() {
        let err = DockerError::op(
            "start",
            "c1",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 409,
                message: "conflict".into(),
            },
        );
        let rt = RuntimeError::from(err);

        assert!(matches!(rt, RuntimeError::Api(ref m) if m.contains("start c1 failed")));
    }

    #[test]
    fn only_404_counts_as_not_found() {
        let gone = DockerError::op(
            "inspect container",
            "c1",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message: "No such container: c1".into(),
            },
        );
        let conflict = DockerError::op(
            "inspect container",
            "c1",
            bollard::errors::Error::DockerResponseServerError {
                status_code: 409,
                message: "conflict".into(),
            },
        );

        assert!(gone.is_not_found());
        assert!(!conflict.is_not_found());
    }

    #[test]
    fn incomplete_responses_are_api_errors() {
        let err = DockerError::Incomplete {
            operation: "list containers",
            field: "id",
        };
        assert!(matches!(RuntimeError::from(err), RuntimeError::Api(_)));
    }
}
