use async_trait::async_trait;
use pinhole_core::error::StorageError;
use pinhole_core::repository::{ReadRepository, Repository, Result};
use pinhole_core::ShortCode;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_KEY_PREFIX: &str = "ph:url:";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Connection settings for [`RedisRepository`].
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct RedisSettings {
    /// Redis connection URL, e.g. `redis://localhost:6379`.
    #[builder(setter(into))]
    pub url: String,
    /// Prefix for every key written by the repository.
    #[builder(default = DEFAULT_KEY_PREFIX.to_string(), setter(into))]
    pub key_prefix: String,
    /// Upper bound for connecting and for each command.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

/// Redis implementation of the repository contract.
///
/// Each mapping is one string key holding the URL verbatim. Inserts use
/// `SET key url NX`, so uniqueness is decided by Redis even when several
/// shortener processes share the same instance.
#[derive(Clone)]
pub struct RedisRepository {
    conn: ConnectionManager,
    key_prefix: String,
    timeout: Duration,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StorageError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        StorageError::Timeout(message)
    } else {
        StorageError::Unavailable(message)
    }
}

/// Runs a Redis call, bounding it by `timeout`.
async fn bounded<T, F>(timeout: Duration, operation: &str, fut: F) -> Result<T>
where
    F: Future<Output = RedisResult<T>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_redis_error(operation, e)),
        Err(_) => Err(StorageError::Timeout(format!(
            "{operation}: no response within {timeout:?}"
        ))),
    }
}

impl RedisRepository {
    /// Creates a repository from an existing connection.
    pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            timeout,
        }
    }

    /// Opens a managed connection to Redis.
    pub async fn connect(settings: RedisSettings) -> Result<Self> {
        let client = redis::Client::open(settings.url.as_str())
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = bounded(
            settings.timeout,
            "failed to connect to Redis",
            ConnectionManager::new(client),
        )
        .await?;
        debug!(key_prefix = %settings.key_prefix, "connected to Redis");
        Ok(Self::new(conn, settings.key_prefix, settings.timeout))
    }

    fn key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl ReadRepository for RedisRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.key(code);
        trace!(code = %code, "fetching URL from Redis");

        let mut conn = self.conn.clone();
        bounded(
            self.timeout,
            "failed to fetch value from Redis",
            conn.get::<_, Option<String>>(&key),
        )
        .await
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        let key = self.key(code);

        let mut conn = self.conn.clone();
        bounded(
            self.timeout,
            "failed to check key in Redis",
            conn.exists::<_, bool>(&key),
        )
        .await
    }
}

#[async_trait]
impl Repository for RedisRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let key = self.key(code);
        trace!(code = %code, "storing URL in Redis");

        let mut conn = self.conn.clone();
        let written = bounded(
            self.timeout,
            "failed to write value to Redis",
            conn.set_nx::<_, _, bool>(&key, original_url),
        )
        .await?;

        if written {
            debug!(code = %code, "stored mapping in Redis");
            Ok(())
        } else {
            trace!(code = %code, "short code already taken");
            Err(StorageError::Conflict(code.to_string()))
        }
    }
}
