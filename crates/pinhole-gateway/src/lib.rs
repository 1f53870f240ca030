//! HTTP front end for the shortener.
//!
//! `POST /shorten` creates a mapping, `GET /{short_code}` redirects to the
//! stored URL with `302 Found`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
