//! Built-in value providers and the provider contract.

use fixturegen_core::{Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::registry::ProviderRegistry;

pub mod abstraction;
pub mod collections;
pub mod complex;
pub mod delegated;
pub mod enums;
pub mod nullable;
pub mod primitives;
pub mod strings;

pub use abstraction::{AbstractionProvider, GenericAbstractionProvider};
pub use collections::{
    ArrayProvider, KeyValuePairProvider, ListProvider, MapProvider, SequenceProvider,
};
pub use complex::{ComplexObjectProvider, ConstructorPlan, ConstructorPlanCache};
pub use delegated::DelegatedProvider;
pub use enums::EnumProvider;
pub use nullable::NullableProvider;
pub use primitives::ScalarProvider;
pub use strings::StringProvider;

/// A producer of values for the shapes it matches.
pub trait ValueProvider: Send + Sync {
    /// Stable identifier, used for registry edits and null-chance overrides.
    fn id(&self) -> &'static str;

    fn matches(&self, shape: &Shape) -> bool;

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError>;
}

/// Register every built-in provider in standard priority order.
pub fn register_defaults(registry: &mut ProviderRegistry) {
    registry.push(Box::new(NullableProvider));
    registry.push(Box::new(EnumProvider));
    primitives::register(registry);
    registry.push(Box::new(GenericAbstractionProvider::new()));
    registry.push(Box::new(ListProvider));
    registry.push(Box::new(MapProvider));
    registry.push(Box::new(KeyValuePairProvider));
    registry.push(Box::new(StringProvider));
    registry.push(Box::new(ArrayProvider));
    registry.push(Box::new(SequenceProvider));
    registry.push(Box::new(ComplexObjectProvider::new()));
}

pub(crate) fn mismatch(provider: &'static str, ctx: &GenerationContext<'_>) -> GenerationError {
    GenerationError::ShapeMismatch {
        provider,
        shape: ctx.shape().clone(),
    }
}
