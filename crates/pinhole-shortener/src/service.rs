use async_trait::async_trait;
use pinhole_core::{ReadRepository, Repository, ShortCode, Shortener, ShortenerError, StorageError};
use pinhole_generator::Generator;
use std::sync::Arc;
use tracing::{debug, trace};

/// Candidates tried per `create` call before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

/// A concrete implementation of the `Shortener` trait.
///
/// Wraps a `Repository` and a `Generator`. Each `create` draws a candidate
/// code and stores it with the repository's atomic insert-if-absent; a
/// conflict means the candidate collided with an existing code, and a new
/// candidate is drawn, up to `max_attempts` times.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    max_attempts: u32,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the retry budget for colliding candidates. Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn create(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        if original_url.is_empty() {
            return Err(ShortenerError::InvalidInput(
                "URL cannot be empty".to_string(),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let code: ShortCode = self.generator.generate().into();

            match self.repository.insert(&code, original_url).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "created short code");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    trace!(code = %code, attempt, "short code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ShortenerError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        match self.repository.get(code).await? {
            Some(url) => Ok(url),
            None => Err(ShortenerError::NotFound(code.to_string())),
        }
    }
}
