use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pinhole_core::error::StorageError;
use pinhole_core::repository::{ReadRepository, Repository, Result};
use pinhole_core::ShortCode;
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Lookups take a shared lock on one shard; inserts take the shard's
/// exclusive lock for the whole check-and-insert, so two inserts racing
/// for the same code cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<ShortCode, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self.storage.get(code).map(|url| url.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        match self.storage.entry(code.clone()) {
            Entry::Occupied(_) => {
                trace!(code = %code, "short code already taken");
                Err(StorageError::Conflict(code.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(original_url.to_owned());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let result = repo.get(&code("abc123")).await.unwrap();
        assert_eq!(result.as_deref(), Some("https://example.com"));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn missing_code_is_none() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&code("nope")).await.unwrap();
        assert!(result.is_none());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn insert_conflict_keeps_first_url() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        let err = repo
            .insert(&code("abc123"), "https://other.com")
            .await
            .unwrap_err();

        assert_eq!(err, StorageError::Conflict("abc123".to_string()));
        let result = repo.get(&code("abc123")).await.unwrap();
        assert_eq!(result.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn exists_follows_insert() {
        let repo = InMemoryRepository::with_capacity(4);

        assert!(!repo.exists(&code("abc123")).await.unwrap());

        repo.insert(&code("abc123"), "https://example.com")
            .await
            .unwrap();

        assert!(repo.exists(&code("abc123")).await.unwrap());
    }

    #[tokio::test]
    async fn url_is_stored_verbatim() {
        let repo = InMemoryRepository::new();
        let url = "  HTTPS://Example.com/a b?q=1&q=2#Frag \u{1F600}";

        repo.insert(&code("raw"), url).await.unwrap();

        assert_eq!(repo.get(&code("raw")).await.unwrap().as_deref(), Some(url));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_inserts_on_one_code_have_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..64u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&code("contested"), &format!("https://example{}.com", i))
                    .await
                    .is_ok()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_see_absent_or_complete_mappings() {
        let repo = Arc::new(InMemoryRepository::with_capacity(16));
        let url_for = |n: usize| format!("https://example.com/{n}/{}", "x".repeat(n));

        let writers: Vec<_> = (0..16)
            .map(|n| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.insert(&code(&format!("w{n:02}")), &url_for(n)).await
                })
            })
            .collect();

        let readers: Vec<_> = (0..16)
            .map(|n| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    // a lookup racing the insert sees nothing or the whole URL
                    if let Some(url) = repo.get(&code(&format!("w{n:02}"))).await.unwrap() {
                        assert_eq!(url, url_for(n));
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.await.unwrap().unwrap();
        }
        for reader in readers {
            reader.await.unwrap();
        }

        assert_eq!(repo.len(), 16);
        for n in 0..16 {
            let stored = repo.get(&code(&format!("w{n:02}"))).await.unwrap();
            assert_eq!(stored, Some(url_for(n)));
        }
    }
}
