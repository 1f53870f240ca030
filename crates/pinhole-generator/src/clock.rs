use crate::error::GeneratorError;
use crate::Generator;
use jiff::Timestamp;
use parking_lot::Mutex;
use pinhole_core::shortcode::MAX_LENGTH;
use pinhole_core::ShortCode;
use typed_builder::TypedBuilder;

/// Longest base58 rendering of a 128-bit value.
const MAX_ENCODED_LENGTH: usize = 22;

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Configures a [`ClockGenerator`].
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ClockSettings {
    /// Prepended to every code.
    ///
    /// Clock readings are only monotonic within one process, so each node
    /// sharing a store should use its own prefix (e.g. "a-", "b-").
    #[builder(default, setter(into))]
    pub prefix: String,
}

/// Derives codes from a nanosecond clock reading rendered as base58.
///
/// Readings are forced to be strictly increasing within one generator: a
/// reading that is not greater than the last issued value (coarse clock,
/// clock moving backward, two calls in the same nanosecond) is replaced by
/// the last value plus one.
pub struct ClockGenerator<C: Clock = SystemClock> {
    clock: C,
    prefix: String,
    last: Mutex<Option<i128>>,
}

impl ClockGenerator<SystemClock> {
    /// Creates a generator backed by the real system clock.
    pub fn new(settings: ClockSettings) -> Result<Self, GeneratorError> {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> ClockGenerator<C> {
    pub fn with_clock(settings: ClockSettings, clock: C) -> Result<Self, GeneratorError> {
        if let Some(symbol) = settings
            .prefix
            .chars()
            .find(|c| !ShortCode::is_valid_char(*c))
        {
            return Err(GeneratorError::InvalidSymbol(symbol));
        }

        let max_prefix = MAX_LENGTH - MAX_ENCODED_LENGTH;
        if settings.prefix.len() > max_prefix {
            return Err(GeneratorError::InvalidLength {
                length: settings.prefix.len(),
                min: 0,
                max: max_prefix,
            });
        }

        Ok(Self {
            clock,
            prefix: settings.prefix,
            last: Mutex::new(None),
        })
    }

    /// Returns the next strictly increasing nanosecond value.
    fn next_value(&self) -> i128 {
        let mut last = self.last.lock();
        let now = self.clock.now().as_nanosecond();

        let value = match *last {
            Some(previous) if now <= previous => previous + 1,
            _ => now,
        };
        *last = Some(value);
        value
    }
}

/// Encodes `value` as base58 after stripping leading zero bytes.
fn encode(value: i128) -> String {
    let bytes = value.to_be_bytes();
    let start = bytes
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(bytes.len() - 1);
    bs58::encode(&bytes[start..]).into_string()
}

impl<C: Clock + 'static> Generator for ClockGenerator<C> {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let value = self.next_value();
        ShortCode::new_unchecked(format!("{}{}", self.prefix, encode(value)))
    }
}
