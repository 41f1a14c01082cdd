use fixturegen_core::{Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{ValueProvider, mismatch};
use crate::random::RandomSourceExt;

/// Picks one declared variant uniformly.
pub struct EnumProvider;

impl ValueProvider for EnumProvider {
    fn id(&self) -> &'static str {
        "enum"
    }

    fn matches(&self, shape: &Shape) -> bool {
        matches!(shape, Shape::Enum(_))
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let Shape::Enum(shape) = ctx.shape() else {
            return Err(mismatch(self.id(), ctx));
        };
        let variants = shape.variants();
        if variants.is_empty() {
            return Err(GenerationError::EmptyEnum(ctx.shape().clone()));
        }
        let index = ctx.random().next_index(variants.len());
        Ok(Value::Enum {
            name: shape.name().to_string(),
            variant: variants[index].clone(),
        })
    }
}
