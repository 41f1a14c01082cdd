//! Array, list, sequence, map and key/value pair providers.
//!
//! Sizes are drawn from the resolved sequence bounds; elements are generated
//! without inherited constraints. Map keys are always `Required`.

use fixturegen_core::{ConstraintSet, GenericDefinition, MapValue, Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{ValueProvider, mismatch};

pub struct ArrayProvider;

impl ValueProvider for ArrayProvider {
    fn id(&self) -> &'static str {
        "collection.array"
    }

    fn matches(&self, shape: &Shape) -> bool {
        matches!(shape, Shape::Array(_))
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let Shape::Array(element) = ctx.shape() else {
            return Err(mismatch(self.id(), ctx));
        };
        generate_items(ctx, element).map(Value::Array)
    }
}

pub struct ListProvider;

impl ValueProvider for ListProvider {
    fn id(&self) -> &'static str {
        "collection.list"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.generic_definition() == Some(GenericDefinition::List)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let [element] = ctx.shape().generic_arguments() else {
            return Err(mismatch(self.id(), ctx));
        };
        generate_items(ctx, element).map(Value::List)
    }
}

pub struct SequenceProvider;

impl ValueProvider for SequenceProvider {
    fn id(&self) -> &'static str {
        "collection.sequence"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.generic_definition() == Some(GenericDefinition::Sequence)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let [element] = ctx.shape().generic_arguments() else {
            return Err(mismatch(self.id(), ctx));
        };
        generate_items(ctx, element).map(Value::Sequence)
    }
}

/// Colliding keys overwrite earlier entries, so maps may end up smaller than
/// the drawn size.
pub struct MapProvider;

impl ValueProvider for MapProvider {
    fn id(&self) -> &'static str {
        "collection.map"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.generic_definition() == Some(GenericDefinition::Map)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let [key_shape, value_shape] = ctx.shape().generic_arguments() else {
            return Err(mismatch(self.id(), ctx));
        };
        let (min, max) = ctx.sequence_bounds()?;
        let size = ctx.draw_size(min, max);
        let key_constraints = ConstraintSet::required();
        let mut map = MapValue::with_capacity(size);
        for _ in 0..size {
            let key = ctx.generate(key_shape, &key_constraints)?;
            let value = ctx.generate_unconstrained(value_shape)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

pub struct KeyValuePairProvider;

impl ValueProvider for KeyValuePairProvider {
    fn id(&self) -> &'static str {
        "collection.key_value_pair"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.generic_definition() == Some(GenericDefinition::KeyValuePair)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let [key_shape, value_shape] = ctx.shape().generic_arguments() else {
            return Err(mismatch(self.id(), ctx));
        };
        let key = ctx.generate_unconstrained(key_shape)?;
        let value = ctx.generate_unconstrained(value_shape)?;
        Ok(Value::Pair(Box::new(key), Box::new(value)))
    }
}

fn generate_items(
    ctx: &GenerationContext<'_>,
    element: &Shape,
) -> Result<Vec<Value>, GenerationError> {
    let (min, max) = ctx.sequence_bounds()?;
    let size = ctx.draw_size(min, max);
    (0..size)
        .map(|_| ctx.generate_unconstrained(element))
        .collect()
}
