//! URL shortener service implementation.
//!
//! [`ShortenerService`] implements [`pinhole_core::Shortener`] on top of any
//! repository and generator. Core types are re-exported from `pinhole_core`.

pub mod service;

pub use pinhole_core::{ShortCode, Shortener, ShortenerError};
pub use service::{ShortenerService, DEFAULT_MAX_ATTEMPTS};
