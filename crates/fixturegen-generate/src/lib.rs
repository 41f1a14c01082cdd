//! Shape-driven test fixture generation.
//!
//! An [`Engine`] owns an ordered [`ProviderRegistry`]. Each request is
//! dispatched to the first provider whose predicate matches the requested
//! [`fixturegen_core::Shape`]; providers recurse back through the engine for
//! sub-shapes via [`GenerationContext`].

pub mod context;
pub mod engine;
pub mod errors;
pub mod fixture;
pub mod providers;
pub mod random;
pub mod registry;
pub mod settings;

pub use context::{GenerationContext, ValueGenerator};
pub use engine::Engine;
pub use errors::GenerationError;
pub use fixture::Fixture;
pub use providers::ValueProvider;
pub use random::{ChaChaSource, RandomSource, RandomSourceExt};
pub use registry::ProviderRegistry;
pub use settings::{CharEncoding, GenerationSettings};
