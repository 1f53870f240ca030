use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the URL stored under `code`.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores `original_url` under `code` if, and only if, the code is free.
    ///
    /// The check and the write happen as one atomic step: of two concurrent
    /// inserts for the same code exactly one succeeds, the other gets
    /// `Err(StorageError::Conflict)`. The stored mapping is never modified
    /// afterwards.
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()>;
}
