use fixturegen_core::{Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::ValueProvider;

type Produce =
    Box<dyn Fn(&GenerationContext<'_>) -> Result<Value, GenerationError> + Send + Sync>;

/// Produces values for exactly one shape with a closure.
pub struct DelegatedProvider {
    id: &'static str,
    shape: Shape,
    produce: Produce,
}

impl DelegatedProvider {
    pub fn new<F>(id: &'static str, shape: Shape, produce: F) -> Self
    where
        F: Fn(&GenerationContext<'_>) -> Result<Value, GenerationError> + Send + Sync + 'static,
    {
        Self {
            id,
            shape,
            produce: Box::new(produce),
        }
    }
}

impl ValueProvider for DelegatedProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn matches(&self, shape: &Shape) -> bool {
        *shape == self.shape
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        (self.produce)(ctx)
    }
}
