use fixturegen_core::{ScalarKind, Shape, Value};

use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::providers::ValueProvider;
use crate::random::RandomSourceExt;
use crate::registry::ProviderRegistry;

const DEFAULT_ORDER: [ScalarKind; 17] = [
    ScalarKind::Bool,
    ScalarKind::U8,
    ScalarKind::Char,
    ScalarKind::DateTime,
    ScalarKind::DateTimeOffset,
    ScalarKind::Decimal,
    ScalarKind::F64,
    ScalarKind::F32,
    ScalarKind::Uuid,
    ScalarKind::I16,
    ScalarKind::I32,
    ScalarKind::I64,
    ScalarKind::I8,
    ScalarKind::TimeSpan,
    ScalarKind::U16,
    ScalarKind::U32,
    ScalarKind::U64,
];

pub fn register(registry: &mut ProviderRegistry) {
    for kind in DEFAULT_ORDER {
        registry.push(Box::new(ScalarProvider::new(kind)));
    }
}

/// Draws one scalar kind straight from the random source. Never null.
pub struct ScalarProvider {
    kind: ScalarKind,
}

impl ScalarProvider {
    pub fn new(kind: ScalarKind) -> Self {
        Self { kind }
    }
}

impl ValueProvider for ScalarProvider {
    fn id(&self) -> &'static str {
        match self.kind {
            ScalarKind::Bool => "primitive.bool",
            ScalarKind::U8 => "primitive.u8",
            ScalarKind::I8 => "primitive.i8",
            ScalarKind::I16 => "primitive.i16",
            ScalarKind::U16 => "primitive.u16",
            ScalarKind::I32 => "primitive.i32",
            ScalarKind::U32 => "primitive.u32",
            ScalarKind::I64 => "primitive.i64",
            ScalarKind::U64 => "primitive.u64",
            ScalarKind::F32 => "primitive.f32",
            ScalarKind::F64 => "primitive.f64",
            ScalarKind::Decimal => "primitive.decimal",
            ScalarKind::Char => "primitive.char",
            ScalarKind::Uuid => "primitive.uuid",
            ScalarKind::DateTime => "primitive.datetime",
            ScalarKind::DateTimeOffset => "primitive.datetimeoffset",
            ScalarKind::TimeSpan => "primitive.timespan",
        }
    }

    fn matches(&self, shape: &Shape) -> bool {
        *shape == Shape::Scalar(self.kind)
    }

    fn provide(&self, ctx: &GenerationContext<'_>) -> Result<Value, GenerationError> {
        let rng = ctx.random();
        let value = match self.kind {
            ScalarKind::Bool => Value::Bool(rng.next_bool()),
            ScalarKind::U8 => Value::U8(rng.next_u8()),
            ScalarKind::I8 => Value::I8(rng.next_i8()),
            ScalarKind::I16 => Value::I16(rng.next_i16()),
            ScalarKind::U16 => Value::U16(rng.next_u16()),
            ScalarKind::I32 => Value::I32(rng.next_i32()),
            ScalarKind::U32 => Value::U32(rng.next_u32()),
            ScalarKind::I64 => Value::I64(rng.next_i64()),
            ScalarKind::U64 => Value::U64(rng.next_u64()),
            ScalarKind::F32 => Value::F32(rng.next_f32()),
            ScalarKind::F64 => Value::F64(rng.next_f64()),
            ScalarKind::Decimal => Value::Decimal(rng.next_decimal()),
            ScalarKind::Char => Value::Char(rng.next_char()),
            ScalarKind::Uuid => Value::Uuid(rng.next_uuid()),
            ScalarKind::DateTime => Value::DateTime(rng.next_date_time()),
            ScalarKind::DateTimeOffset => Value::DateTimeOffset(rng.next_date_time_offset()),
            ScalarKind::TimeSpan => Value::TimeSpan(rng.next_time_span()),
        };
        Ok(value)
    }
}
