use testcontainers::TestcontainersError;
use thiserror::Error;

/// Failure to start or inspect a fixture container.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("fixture container failed: {0}")]
    Container(#[from] TestcontainersError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
