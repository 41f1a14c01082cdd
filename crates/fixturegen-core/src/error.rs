use thiserror::Error;

/// Core error type shared across fixturegen crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A percentage was built from a value outside its allowed range.
    #[error("invalid percentage: {0}")]
    InvalidPercentage(String),
    /// A length constraint was built with an out-of-range length.
    #[error("invalid length constraint: {0}")]
    InvalidLength(String),
    /// A shape expression could not be parsed.
    #[error("invalid shape expression '{expr}': {message}")]
    InvalidExpression { expr: String, message: String },
    /// A shape document violates internal invariants.
    #[error("invalid shape document: {0}")]
    InvalidDocument(String),
    /// A constructor rejected the arguments it was given.
    #[error("construction failed: {0}")]
    Construction(String),
}

/// Convenience alias for results returned by fixturegen crates.
pub type Result<T> = std::result::Result<T, Error>;
