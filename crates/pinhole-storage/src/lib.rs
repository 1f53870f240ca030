//! Backing stores for the shortener.

pub mod memory;
pub mod redis_store;

pub use memory::InMemoryRepository;
pub use pinhole_core::error::StorageError;
pub use pinhole_core::repository::{ReadRepository, Repository, Result};
pub use redis_store::{RedisRepository, RedisSettings};
