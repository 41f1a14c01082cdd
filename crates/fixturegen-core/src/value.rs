use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::shape::{GenericDefinition, ScalarKind, Shape};

/// A generated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    U8(u8),
    I8(i8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    String(String),
    Uuid(Uuid),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    TimeSpan(TimeDelta),
    Enum { name: String, variant: String },
    Array(Vec<Value>),
    List(Vec<Value>),
    Sequence(Vec<Value>),
    Map(MapValue),
    Pair(Box<Value>, Box<Value>),
    Object(ObjectValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short label for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::U16(_) => "u16",
            Value::I32(_) => "i32",
            Value::U32(_) => "u32",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "decimal",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Uuid(_) => "uuid",
            Value::DateTime(_) => "datetime",
            Value::DateTimeOffset(_) => "datetimeoffset",
            Value::TimeSpan(_) => "timespan",
            Value::Enum { .. } => "enum",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Sequence(_) => "seq",
            Value::Map(_) => "map",
            Value::Pair(_, _) => "pair",
            Value::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Items of an array, list or sequence.
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::List(items) | Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Length of a string (in chars) or the size of a container.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::String(value) => Some(value.chars().count()),
            Value::Array(items) | Value::List(items) | Value::Sequence(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Whether this value could have been produced for `shape`.
    ///
    /// Null conforms only to null-capable shapes. Abstract shapes accept any
    /// object, since the concrete mapping lives in the registry.
    pub fn conforms_to(&self, shape: &Shape) -> bool {
        if self.is_null() {
            return shape.is_null_capable();
        }
        match (shape, self) {
            (Shape::Optional(inner), value) => value.conforms_to(inner),
            (Shape::Scalar(kind), value) => scalar_matches(*kind, value),
            (Shape::String, Value::String(_)) => true,
            (Shape::Enum(shape), Value::Enum { name, variant }) => {
                shape.name() == name && shape.variants().iter().any(|v| v == variant)
            }
            (Shape::Array(element), Value::Array(items)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (Shape::Generic(generic), value) => {
                let args = generic.arguments();
                match (generic.definition(), value) {
                    (
                        GenericDefinition::List | GenericDefinition::ListInterface,
                        Value::List(items),
                    )
                    | (GenericDefinition::Sequence, Value::Sequence(items)) => {
                        items.iter().all(|item| item.conforms_to(&args[0]))
                    }
                    (GenericDefinition::Map | GenericDefinition::MapInterface, Value::Map(map)) => {
                        map.iter()
                            .all(|(k, v)| k.conforms_to(&args[0]) && v.conforms_to(&args[1]))
                    }
                    (GenericDefinition::KeyValuePair, Value::Pair(key, value)) => {
                        key.conforms_to(&args[0]) && value.conforms_to(&args[1])
                    }
                    _ => false,
                }
            }
            (Shape::Object(shape), Value::Object(object)) => shape.name() == object.type_name(),
            (Shape::Abstract(_), Value::Object(_)) => true,
            _ => false,
        }
    }
}

fn scalar_matches(kind: ScalarKind, value: &Value) -> bool {
    matches!(
        (kind, value),
        (ScalarKind::Bool, Value::Bool(_))
            | (ScalarKind::U8, Value::U8(_))
            | (ScalarKind::I8, Value::I8(_))
            | (ScalarKind::I16, Value::I16(_))
            | (ScalarKind::U16, Value::U16(_))
            | (ScalarKind::I32, Value::I32(_))
            | (ScalarKind::U32, Value::U32(_))
            | (ScalarKind::I64, Value::I64(_))
            | (ScalarKind::U64, Value::U64(_))
            | (ScalarKind::F32, Value::F32(_))
            | (ScalarKind::F64, Value::F64(_))
            | (ScalarKind::Decimal, Value::Decimal(_))
            | (ScalarKind::Char, Value::Char(_))
            | (ScalarKind::Uuid, Value::Uuid(_))
            | (ScalarKind::DateTime, Value::DateTime(_))
            | (ScalarKind::DateTimeOffset, Value::DateTimeOffset(_))
            | (ScalarKind::TimeSpan, Value::TimeSpan(_))
    )
}

/// Insertion-ordered map with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Assign `value` to `key`, replacing any previous value in place.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(&mut slot.1, value));
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn into_entries(self) -> Vec<(Value, Value)> {
        self.entries
    }
}

/// An instance of a complex shape: its type name plus named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl ObjectValue {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Assign a field, replacing a previous value of the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::U8(value) => serializer.serialize_u8(*value),
            Value::I8(value) => serializer.serialize_i8(*value),
            Value::I16(value) => serializer.serialize_i16(*value),
            Value::U16(value) => serializer.serialize_u16(*value),
            Value::I32(value) => serializer.serialize_i32(*value),
            Value::U32(value) => serializer.serialize_u32(*value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::U64(value) => serializer.serialize_u64(*value),
            Value::F32(value) => serializer.serialize_f32(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
            Value::Decimal(value) => serializer.serialize_str(&value.to_string()),
            Value::Char(value) => serializer.serialize_char(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Uuid(value) => serializer.serialize_str(&value.to_string()),
            Value::DateTime(value) => {
                serializer.serialize_str(&value.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
            }
            Value::DateTimeOffset(value) => serializer.serialize_str(&value.to_rfc3339()),
            Value::TimeSpan(value) => serializer.serialize_str(&value.to_string()),
            Value::Enum { variant, .. } => serializer.serialize_str(variant),
            Value::Array(items) | Value::List(items) | Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut seq = serializer.serialize_seq(Some(map.len()))?;
                for (key, value) in map.iter() {
                    seq.serialize_element(&(key, value))?;
                }
                seq.end()
            }
            Value::Pair(key, value) => (key, value).serialize(serializer),
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.fields.len() + 1))?;
                map.serialize_entry("$type", &object.type_name)?;
                for (name, value) in &object.fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_insert_overwrites_existing_key_in_place() {
        let mut map = MapValue::new();
        map.insert(Value::I32(1), Value::Bool(false));
        map.insert(Value::I32(2), Value::Bool(false));
        let previous = map.insert(Value::I32(1), Value::Bool(true));
        assert_eq!(previous, Some(Value::Bool(false)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().next(), Some(&Value::I32(1)));
        assert_eq!(map.get(&Value::I32(1)), Some(&Value::Bool(true)));
    }

    #[test]
    fn null_conforms_only_to_null_capable_shapes() {
        assert!(Value::Null.conforms_to(&Shape::String));
        assert!(Value::Null.conforms_to(&Shape::optional(Shape::I32)));
        assert!(!Value::Null.conforms_to(&Shape::I32));
        assert!(!Value::Null.conforms_to(&Shape::list(Shape::I32)));
    }
}
