use std::sync::Arc;

use pinhole_core::Shortener;

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Arc<str>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, base_url: impl AsRef<str>) -> Self {
        Self {
            shortener,
            base_url: Arc::from(base_url.as_ref()),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Public URL that short codes are appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
