use thiserror::Error;

use fixturegen_core::Shape;

/// Errors emitted while configuring or running generation.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no provider registered for shape '{0}'")]
    NoProvider(Shape),
    #[error("'{0}' is neither abstract nor an interface")]
    NotAbstract(String),
    #[error("cannot map '{from}' to '{to}': type argument counts differ")]
    ArityMismatch {
        from: &'static str,
        to: &'static str,
    },
    #[error("shape '{0}' has no public constructor")]
    NoPublicConstructor(Shape),
    #[error("invalid bounds for '{shape}': min {min} is greater than max {max}")]
    InvalidBounds {
        shape: Shape,
        min: usize,
        max: usize,
    },
    #[error("invalid registry position {index} (len {len})")]
    InvalidPosition { index: usize, len: usize },
    #[error("no provider with id '{0}' is registered")]
    UnknownProvider(String),
    #[error("provider '{provider}' cannot produce shape '{shape}'")]
    ShapeMismatch {
        provider: &'static str,
        shape: Shape,
    },
    #[error("construction of '{shape}' failed: {message}")]
    Construction { shape: Shape, message: String },
    #[error("enum '{0}' declares no variants")]
    EmptyEnum(Shape),
    #[error("unexpected null for '{0}'")]
    UnexpectedNull(Shape),
    #[error("expected a {expected} value, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Core(#[from] fixturegen_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
