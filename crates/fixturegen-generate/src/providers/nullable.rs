use fixturegen_core::{Constraint, Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::{ValueProvider, mismatch};

/// Rolls for null on behalf of `Optional(T)`, then delegates to `T`.
///
/// The inner call is made `Required`, so `string?` and `Obj?` take a single
/// draw.
pub struct NullableProvider;

impl ValueProvider for NullableProvider {
    fn id(&self) -> &'static str {
        "nullable"
    }

    fn matches(&self, shape: &Shape) -> bool {
        shape.optional_inner().is_some()
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let inner = ctx
            .shape()
            .optional_inner()
            .ok_or_else(|| mismatch(self.id(), ctx))?;
        if ctx.roll_for_null() {
            return Ok(Value::Null);
        }
        let constraints = ctx.constraints().clone().with(Constraint::Required);
        ctx.generate(inner, &constraints)
    }
}
