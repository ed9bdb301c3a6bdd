//! Runtime values and the typed-composite bridge
//!
//! Values cross the codec boundary as the dynamic [`Value`] enum, mirroring
//! the schema shapes one-to-one. Concrete composite types opt in through the
//! [`DataType`] trait, which replaces runtime reflection with an explicit
//! schema-construction and conversion step.

use std::collections::HashMap;

use crate::error::{CodecError, Result};
use crate::schema::{PrimitiveKind, TypeSchema};

/// A runtime value, shaped by a [`TypeSchema`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; encodes as an empty buffer at top level
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(String),
    Byte(i8),
    Array(Vec<Value>),
    Object(ObjectValue),
}

impl Value {
    /// The default/zero value for a schema shape
    ///
    /// Numeric kinds default to zero, booleans to `false`, chars to `'\0'`.
    /// Strings, arrays and objects default to the absent reference, `Null` —
    /// an *empty* string or array is a real value, never a default.
    pub fn default_for(schema: &TypeSchema) -> Value {
        match schema {
            TypeSchema::Primitive(kind) => match kind {
                PrimitiveKind::Boolean => Value::Boolean(false),
                PrimitiveKind::Int32 => Value::Int(0),
                PrimitiveKind::Int64 => Value::Long(0),
                PrimitiveKind::Float32 => Value::Float(0.0),
                PrimitiveKind::Float64 => Value::Double(0.0),
                PrimitiveKind::Char => Value::Char('\0'),
                PrimitiveKind::Byte => Value::Byte(0),
                PrimitiveKind::String => Value::Null,
            },
            TypeSchema::Array(_) | TypeSchema::Object { .. } => Value::Null,
        }
    }

    /// Whether this value is a default/zero value
    ///
    /// Drives property omission during object encoding: a property holding a
    /// default value is left out of the encoded form entirely.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Long(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::Double(n) => *n == 0.0,
            Value::Char(c) => *c == '\0',
            Value::Byte(n) => *n == 0,
            Value::String(_) | Value::Array(_) | Value::Object(_) => false,
        }
    }

    /// Short name of the value's shape, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int32",
            Value::Long(_) => "int64",
            Value::Float(_) => "float32",
            Value::Double(_) => "float64",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Byte(_) => "byte",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Whether this value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Value::Object(object)
    }
}

/// An instance of a named composite type
///
/// Equality treats a field held at its default value as equal to an absent
/// field, so a decoded instance (with defaults materialized for omitted
/// properties) compares equal to the instance it was encoded from.
#[derive(Debug, Clone, Default)]
pub struct ObjectValue {
    /// Name of the composite type this instance belongs to
    pub type_name: String,
    /// Field values by property name; absent fields hold their default
    pub fields: HashMap<String, Value>,
}

impl ObjectValue {
    /// Create an empty instance of the named type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: HashMap::new(),
        }
    }

    /// Set a field, builder style
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value, if it was explicitly set or decoded
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        if self.type_name != other.type_name {
            return false;
        }
        let keys = self.fields.keys().chain(other.fields.keys());
        for key in keys {
            match (self.fields.get(key), other.fields.get(key)) {
                (Some(a), Some(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Some(v), None) | (None, Some(v)) => {
                    if !v.is_default() {
                        return false;
                    }
                }
                (None, None) => unreachable!("key came from one of the two maps"),
            }
        }
        true
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => String,
    &str => String,
    i8 => Byte,
    Vec<Value> => Array,
}

/// A concrete composite type the codec can materialize
///
/// Implemented once per declared type by the embedding system (by hand or by
/// codegen); the codec itself only ever follows the schema.
pub trait DataType: Sized {
    /// The registered type name
    fn type_name() -> &'static str;

    /// The type's schema; always an [`TypeSchema::Object`]
    fn type_schema() -> TypeSchema;

    /// Convert an instance into the dynamic value form
    fn to_value(&self) -> Value;

    /// Materialize an instance from the dynamic value form
    fn from_value(value: &Value) -> Result<Self>;
}

/// Borrow the [`ObjectValue`] out of a value expected to be an object of the
/// named type. Intended for `DataType::from_value` implementations.
pub fn expect_object<'a>(value: &'a Value, type_name: &str) -> Result<&'a ObjectValue> {
    match value {
        Value::Object(object) if object.type_name == type_name => Ok(object),
        other => Err(CodecError::unexpected(
            format!("object {}", type_name),
            other.kind_name(),
        )),
    }
}
