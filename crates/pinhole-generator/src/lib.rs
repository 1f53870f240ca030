//! Short code generators.
//!
//! Two strategies are provided: [`RandomGenerator`] draws fixed-length
//! tokens from an alphabet, [`ClockGenerator`] renders a strictly
//! increasing nanosecond clock reading. Both are pure; uniqueness against
//! stored codes is enforced by the shortener's insert-and-retry loop.

pub mod clock;
pub mod error;
pub mod random;

pub use clock::{Clock, ClockGenerator, ClockSettings, SystemClock};
pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomSettings};

use pinhole_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage,
/// and must be callable from many tasks at once.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate short code.
    ///
    /// Candidates are expected to be unique with high probability, not
    /// guaranteed; callers check them against the store.
    fn generate(&self) -> Self::Output;
}
