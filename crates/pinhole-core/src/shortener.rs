use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `original_url` under a freshly generated short code and
    /// returns that code.
    ///
    /// The URL is stored verbatim. It becomes resolvable only once this
    /// call returns `Ok`.
    async fn create(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to the URL it was created for.
    ///
    /// Returns `Err(ShortenerError::NotFound)` if the code was never created.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
