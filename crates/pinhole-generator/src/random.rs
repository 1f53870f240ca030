use crate::error::GeneratorError;
use crate::Generator;
use parking_lot::Mutex;
use pinhole_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use pinhole_core::ShortCode;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashSet;
use typed_builder::TypedBuilder;

pub const DEFAULT_LENGTH: usize = 6;
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomSettings {
    /// Number of symbols in every generated code.
    #[builder(default = DEFAULT_LENGTH)]
    pub length: usize,
    /// Symbols codes are drawn from. Each symbol must be unique.
    #[builder(default = DEFAULT_ALPHABET.to_string(), setter(into))]
    pub alphabet: String,
}

impl Default for RandomSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws every symbol of a code uniformly and independently from an alphabet.
///
/// The random source is owned by the generator and guarded by a mutex, so a
/// seeded RNG gives a reproducible sequence of codes.
#[derive(Debug)]
pub struct RandomGenerator<R = StdRng> {
    alphabet: Vec<u8>,
    length: usize,
    rng: Mutex<R>,
}

impl RandomGenerator<StdRng> {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn new(settings: RandomSettings) -> Result<Self, GeneratorError> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a generator with a deterministic seed.
    pub fn seeded(settings: RandomSettings, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore + Send> RandomGenerator<R> {
    /// Creates a generator drawing from the given random source.
    pub fn with_rng(settings: RandomSettings, rng: R) -> Result<Self, GeneratorError> {
        if settings.length < MIN_LENGTH || settings.length > MAX_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length: settings.length,
                min: MIN_LENGTH,
                max: MAX_LENGTH,
            });
        }

        if settings.alphabet.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }

        let mut seen = HashSet::new();
        for symbol in settings.alphabet.chars() {
            if !ShortCode::is_valid_char(symbol) {
                return Err(GeneratorError::InvalidSymbol(symbol));
            }
            if !seen.insert(symbol) {
                return Err(GeneratorError::DuplicateSymbol(symbol));
            }
        }

        Ok(Self {
            alphabet: settings.alphabet.into_bytes(),
            length: settings.length,
            rng: Mutex::new(rng),
        })
    }

    /// Bits of entropy carried by one generated code.
    pub fn entropy_bits(&self) -> f64 {
        self.length as f64 * (self.alphabet.len() as f64).log2()
    }

    /// Total number of distinct codes this generator can produce.
    ///
    /// Saturates at `u128::MAX`.
    pub fn keyspace(&self) -> u128 {
        (self.alphabet.len() as u128)
            .checked_pow(self.length as u32)
            .unwrap_or(u128::MAX)
    }
}

impl<R: RngCore + Send + 'static> Generator for RandomGenerator<R> {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let mut rng = self.rng.lock();
        let code: String = (0..self.length)
            .map(|_| self.alphabet[rng.gen_range(0..self.alphabet.len())] as char)
            .collect();
        // settings were validated in `with_rng`
        ShortCode::new_unchecked(code)
    }
}
