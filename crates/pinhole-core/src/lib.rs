//! Core types and traits for the Pinhole URL shortener.
//!
//! This crate holds the contracts shared by the generator, storage,
//! shortener and gateway crates: the [`ShortCode`] key type, the
//! [`Repository`] backing-store contract and the [`Shortener`] service
//! contract with its `create` / `resolve` operations.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
