use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors returned by backing stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors returned by the [`Shortener`](crate::Shortener) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("no unique short code after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_surface_as_store_unavailable() {
        let err: ShortenerError = StorageError::Timeout("GET ph:url:abc".to_string()).into();
        assert_eq!(
            err,
            ShortenerError::StoreUnavailable(
                "storage operation timed out: GET ph:url:abc".to_string()
            )
        );
    }

    #[test]
    fn exhausted_message_names_attempts() {
        let err = ShortenerError::GenerationExhausted { attempts: 8 };
        assert_eq!(err.to_string(), "no unique short code after 8 attempts");
    }
}
