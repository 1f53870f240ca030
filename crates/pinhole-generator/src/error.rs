use thiserror::Error;

/// Errors returned when a generator is configured with unusable settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("alphabet must not be empty")]
    EmptyAlphabet,
    #[error("alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),
    #[error("symbol '{0}' is not allowed in a short code")]
    InvalidSymbol(char),
    #[error("code length {length} is out of range; expected {min}..={max}")]
    InvalidLength { length: usize, min: usize, max: usize },
}
