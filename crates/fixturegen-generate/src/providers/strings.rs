use fixturegen_core::{Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::ValueProvider;

/// Random strings decoded unit by unit with the configured encoding.
pub struct StringProvider;

impl ValueProvider for StringProvider {
    fn id(&self) -> &'static str {
        "string"
    }

    fn matches(&self, shape: &Shape) -> bool {
        matches!(shape, Shape::String)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        if ctx.roll_for_null() {
            return Ok(Value::Null);
        }
        let (min, max) = ctx.string_bounds()?;
        let length = ctx.draw_size(min, max);

        let encoding = ctx.settings().encoding;
        let mut bytes = vec![0u8; length * encoding.unit_size()];
        ctx.random().fill_bytes(&mut bytes);

        let value: String = bytes
            .chunks_exact(encoding.unit_size())
            .map(|unit| encoding.decode_unit(unit))
            .collect();
        Ok(Value::String(value))
    }
}
