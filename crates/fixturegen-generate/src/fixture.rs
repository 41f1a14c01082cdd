use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use fixturegen_core::{Shape, Value};

use crate::errors::GenerationError;

/// A Rust type that can be produced by the engine.
///
/// Null maps only onto `Option`; the engine generates every other position
/// of a fixture as `Required`.
pub trait Fixture: Sized {
    fn shape() -> Shape;

    fn from_value(value: Value) -> Result<Self, GenerationError>;
}

fn unexpected(shape: Shape, expected: &'static str, value: &Value) -> GenerationError {
    if value.is_null() {
        GenerationError::UnexpectedNull(shape)
    } else {
        GenerationError::TypeMismatch {
            expected,
            actual: value.kind(),
        }
    }
}

macro_rules! scalar_fixture {
    ($($ty:ty => $variant:ident, $shape:expr, $label:literal;)*) => {
        $(
            impl Fixture for $ty {
                fn shape() -> Shape {
                    $shape
                }

                fn from_value(value: Value) -> Result<Self, GenerationError> {
                    match value {
                        Value::$variant(inner) => Ok(inner),
                        other => Err(unexpected(Self::shape(), $label, &other)),
                    }
                }
            }
        )*
    };
}

scalar_fixture! {
    bool => Bool, Shape::BOOL, "bool";
    u8 => U8, Shape::U8, "u8";
    i8 => I8, Shape::I8, "i8";
    i16 => I16, Shape::I16, "i16";
    u16 => U16, Shape::U16, "u16";
    i32 => I32, Shape::I32, "i32";
    u32 => U32, Shape::U32, "u32";
    i64 => I64, Shape::I64, "i64";
    u64 => U64, Shape::U64, "u64";
    f32 => F32, Shape::F32, "f32";
    f64 => F64, Shape::F64, "f64";
    char => Char, Shape::CHAR, "char";
    Decimal => Decimal, Shape::DECIMAL, "decimal";
    Uuid => Uuid, Shape::UUID, "uuid";
    NaiveDateTime => DateTime, Shape::DATE_TIME, "datetime";
    DateTime<FixedOffset> => DateTimeOffset, Shape::DATE_TIME_OFFSET, "datetimeoffset";
    TimeDelta => TimeSpan, Shape::TIME_SPAN, "timespan";
    String => String, Shape::String, "string";
}

impl<T: Fixture> Fixture for Option<T> {
    fn shape() -> Shape {
        Shape::optional(T::shape())
    }

    fn from_value(value: Value) -> Result<Self, GenerationError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Fixture> Fixture for Vec<T> {
    fn shape() -> Shape {
        Shape::list(T::shape())
    }

    fn from_value(value: Value) -> Result<Self, GenerationError> {
        match value {
            Value::List(items) | Value::Array(items) | Value::Sequence(items) => {
                items.into_iter().map(T::from_value).collect()
            }
            other => Err(unexpected(Self::shape(), "list", &other)),
        }
    }
}

impl<K, V> Fixture for HashMap<K, V>
where
    K: Fixture + Eq + Hash,
    V: Fixture,
{
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn from_value(value: Value) -> Result<Self, GenerationError> {
        match value {
            Value::Map(map) => map
                .into_entries()
                .into_iter()
                .map(|(key, value)| -> Result<(K, V), GenerationError> {
                    Ok((K::from_value(key)?, V::from_value(value)?))
                })
                .collect(),
            other => Err(unexpected(Self::shape(), "map", &other)),
        }
    }
}

impl<K, V> Fixture for BTreeMap<K, V>
where
    K: Fixture + Ord,
    V: Fixture,
{
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }

    fn from_value(value: Value) -> Result<Self, GenerationError> {
        match value {
            Value::Map(map) => map
                .into_entries()
                .into_iter()
                .map(|(key, value)| -> Result<(K, V), GenerationError> {
                    Ok((K::from_value(key)?, V::from_value(value)?))
                })
                .collect(),
            other => Err(unexpected(Self::shape(), "map", &other)),
        }
    }
}

impl<K: Fixture, V: Fixture> Fixture for (K, V) {
    fn shape() -> Shape {
        Shape::pair(K::shape(), V::shape())
    }

    fn from_value(value: Value) -> Result<Self, GenerationError> {
        match value {
            Value::Pair(key, value) => Ok((K::from_value(*key)?, V::from_value(*value)?)),
            other => Err(unexpected(Self::shape(), "pair", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_for_non_optional_is_rejected() {
        assert!(matches!(
            String::from_value(Value::Null),
            Err(GenerationError::UnexpectedNull(Shape::String))
        ));
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
    }

    #[test]
    fn mismatched_variants_are_rejected() {
        assert!(matches!(
            i32::from_value(Value::Bool(true)),
            Err(GenerationError::TypeMismatch {
                expected: "i32",
                actual: "bool"
            })
        ));
    }

    #[test]
    fn converts_nested_containers() {
        let value = Value::Pair(
            Box::new(Value::U8(3)),
            Box::new(Value::List(vec![Value::Bool(true), Value::Bool(false)])),
        );
        let (key, items) = <(u8, Vec<bool>)>::from_value(value).unwrap();
        assert_eq!(key, 3);
        assert_eq!(items, vec![true, false]);
    }
}
