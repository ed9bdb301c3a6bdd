//! The encode/decode engine
//!
//! [`Codec`] converts values to and from their canonical textual byte
//! encoding, dispatching recursively over the [`TypeSchema`] variant. It is
//! stateless apart from a borrowed registry reference and is safe to share
//! across threads; every call is a pure, synchronous transformation.
//!
//! The wire form is JSON-compatible UTF-8 text with no insignificant
//! whitespace: bare literals for primitives, quoted JSON-escaped literals for
//! strings and chars, `[...]` for arrays and `{...}` for objects with
//! properties at their default value omitted.

use serde_json::Value as Json;

use crate::error::{CodecError, Result};
use crate::registry::TypeRegistry;
use crate::schema::{PrimitiveKind, Property, TypeSchema};
use crate::value::{DataType, ObjectValue, Value};

/// The schema-directed value codec
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Codec<'r> {
    /// Create a codec over a registry
    ///
    /// The registry is consulted only when a schema names a composite type;
    /// primitive and array schemas never touch it.
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Encode a value per its schema into the canonical byte form
    ///
    /// A `Null` value encodes as an empty buffer for any schema.
    pub fn to_buffer(&self, value: &Value, schema: &TypeSchema) -> Result<Vec<u8>> {
        if value.is_null() {
            return Ok(Vec::new());
        }
        let mut out = String::new();
        self.write_value(&mut out, value, schema)?;
        Ok(out.into_bytes())
    }

    /// Decode the canonical byte form into a value of the schema's shape
    ///
    /// An empty buffer decodes to `Null` for any schema.
    pub fn from_buffer(&self, bytes: &[u8], schema: &TypeSchema) -> Result<Value> {
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        let json: Json = serde_json::from_slice(bytes)?;
        self.read_value(&json, schema)
    }

    /// Encode a concrete composite instance
    pub fn to_buffer_typed<T: DataType>(&self, value: &T) -> Result<Vec<u8>> {
        self.to_buffer(&value.to_value(), &T::type_schema())
    }

    /// Encode a slice of concrete composite instances as a top-level array
    pub fn to_buffer_slice<T: DataType>(&self, values: &[T]) -> Result<Vec<u8>> {
        let items: Vec<Value> = values.iter().map(T::to_value).collect();
        self.to_buffer(&Value::Array(items), &TypeSchema::array(T::type_schema()))
    }

    /// Decode a buffer into a concrete composite instance
    pub fn from_buffer_as<T: DataType>(&self, bytes: &[u8]) -> Result<T> {
        let value = self.from_buffer(bytes, &T::type_schema())?;
        T::from_value(&value)
    }

    /// Decode a top-level array buffer into concrete composite instances
    pub fn from_buffer_vec<T: DataType>(&self, bytes: &[u8]) -> Result<Vec<T>> {
        let schema = TypeSchema::array(T::type_schema());
        match self.from_buffer(bytes, &schema)? {
            Value::Array(items) => items.iter().map(T::from_value).collect(),
            other => Err(CodecError::unexpected("array", other.kind_name())),
        }
    }

    fn write_value(&self, out: &mut String, value: &Value, schema: &TypeSchema) -> Result<()> {
        if value.is_null() {
            out.push_str("null");
            return Ok(());
        }
        match schema {
            TypeSchema::Primitive(kind) => write_primitive(out, *kind, value),
            TypeSchema::Array(element) => {
                let items = match value {
                    Value::Array(items) => items,
                    other => return Err(CodecError::unexpected("array", other.kind_name())),
                };
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(',');
                    }
                    self.write_value(out, item, element)?;
                }
                out.push(']');
                Ok(())
            }
            TypeSchema::Object { name, .. } => {
                let object = match value {
                    Value::Object(object) => object,
                    other => {
                        return Err(CodecError::unexpected(
                            format!("object {}", name),
                            other.kind_name(),
                        ))
                    }
                };
                self.write_object(out, object, name)
            }
        }
    }

    fn write_object(&self, out: &mut String, object: &ObjectValue, name: &str) -> Result<()> {
        // Always resolve through the registry: the passed-in schema may be a
        // bare reference, and an unregistered name is a configuration error.
        let registered = self.registry.lookup(name)?;
        if object.type_name != name {
            return Err(CodecError::unexpected(
                format!("object {}", name),
                format!("object {}", object.type_name),
            ));
        }
        let properties = registered.properties();
        for field in object.fields.keys() {
            if !properties.iter().any(|p| &p.name == field) {
                return Err(CodecError::UnknownProperty {
                    type_name: name.to_string(),
                    property: field.clone(),
                });
            }
        }

        out.push('{');
        let mut first = true;
        for property in properties {
            let value = match object.fields.get(&property.name) {
                Some(value) if !value.is_default() => value,
                _ => continue,
            };
            if !first {
                out.push(',');
            }
            first = false;
            out.push_str(&serde_json::to_string(&property.name)?);
            out.push(':');
            self.write_value(out, value, &property.schema)?;
        }
        out.push('}');
        Ok(())
    }

    fn read_value(&self, json: &Json, schema: &TypeSchema) -> Result<Value> {
        if json.is_null() {
            return Ok(Value::Null);
        }
        match schema {
            TypeSchema::Primitive(kind) => read_primitive(json, *kind),
            TypeSchema::Array(element) => {
                let items = match json {
                    Json::Array(items) => items,
                    other => return Err(CodecError::unexpected("array", json_kind(other))),
                };
                let values: Vec<Value> = items
                    .iter()
                    .map(|item| self.read_value(item, element))
                    .collect::<Result<_>>()?;
                Ok(Value::Array(values))
            }
            TypeSchema::Object { name, .. } => self.read_object(json, name),
        }
    }

    fn read_object(&self, json: &Json, name: &str) -> Result<Value> {
        let registered = self.registry.lookup(name)?;
        let map = match json {
            Json::Object(map) => map,
            other => {
                return Err(CodecError::unexpected(
                    format!("object {}", name),
                    json_kind(other),
                ))
            }
        };
        let properties = registered.properties();

        // Strict schema conformance: the input may order properties freely,
        // but every name must be declared.
        for key in map.keys() {
            if !properties.iter().any(|p| &p.name == key) {
                return Err(CodecError::UnknownProperty {
                    type_name: name.to_string(),
                    property: key.clone(),
                });
            }
        }

        let mut object = ObjectValue::new(name);
        for Property { name, schema } in properties {
            let value = match map.get(name) {
                Some(json) => self.read_value(json, schema)?,
                None => Value::default_for(schema),
            };
            object.fields.insert(name.clone(), value);
        }
        Ok(Value::Object(object))
    }
}

fn write_primitive(out: &mut String, kind: PrimitiveKind, value: &Value) -> Result<()> {
    match (kind, value) {
        (PrimitiveKind::Boolean, Value::Boolean(b)) => {
            out.push_str(if *b { "true" } else { "false" })
        }
        (PrimitiveKind::Int32, Value::Int(n)) => out.push_str(&n.to_string()),
        (PrimitiveKind::Int64, Value::Long(n)) => out.push_str(&n.to_string()),
        (PrimitiveKind::Byte, Value::Byte(n)) => out.push_str(&n.to_string()),
        // Display renders the shortest decimal text that parses back to the
        // identical bit pattern, which is exactly the wire contract.
        (PrimitiveKind::Float32, Value::Float(n)) => out.push_str(&n.to_string()),
        (PrimitiveKind::Float64, Value::Double(n)) => out.push_str(&n.to_string()),
        (PrimitiveKind::Char, Value::Char(c)) => out.push_str(&serde_json::to_string(c)?),
        (PrimitiveKind::String, Value::String(s)) => out.push_str(&serde_json::to_string(s)?),
        (kind, other) => return Err(CodecError::unexpected(kind.name(), other.kind_name())),
    }
    Ok(())
}

fn read_primitive(json: &Json, kind: PrimitiveKind) -> Result<Value> {
    match kind {
        PrimitiveKind::Boolean => match json {
            Json::Bool(b) => Ok(Value::Boolean(*b)),
            other => Err(CodecError::unexpected(kind.name(), json_kind(other))),
        },
        PrimitiveKind::Int32 => {
            let n = integer_literal(json, kind)?;
            i32::try_from(n)
                .map(Value::Int)
                .map_err(|_| out_of_range(kind, n))
        }
        PrimitiveKind::Int64 => integer_literal(json, kind).map(Value::Long),
        PrimitiveKind::Byte => {
            let n = integer_literal(json, kind)?;
            i8::try_from(n)
                .map(Value::Byte)
                .map_err(|_| out_of_range(kind, n))
        }
        PrimitiveKind::Float32 => float_literal(json, kind).map(|n| Value::Float(n as f32)),
        PrimitiveKind::Float64 => float_literal(json, kind).map(Value::Double),
        PrimitiveKind::Char => match json {
            Json::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(CodecError::InvalidChar { found: s.clone() }),
                }
            }
            other => Err(CodecError::unexpected(kind.name(), json_kind(other))),
        },
        PrimitiveKind::String => match json {
            Json::String(s) => Ok(Value::String(s.clone())),
            other => Err(CodecError::unexpected(kind.name(), json_kind(other))),
        },
    }
}

fn integer_literal(json: &Json, kind: PrimitiveKind) -> Result<i64> {
    match json {
        Json::Number(n) => n.as_i64().ok_or_else(|| {
            if n.is_u64() {
                CodecError::OutOfRange {
                    kind: kind.name().to_string(),
                    value: n.to_string(),
                }
            } else {
                CodecError::unexpected(kind.name(), "non-integer number")
            }
        }),
        other => Err(CodecError::unexpected(kind.name(), json_kind(other))),
    }
}

fn float_literal(json: &Json, kind: PrimitiveKind) -> Result<f64> {
    match json {
        Json::Number(n) => n
            .as_f64()
            .ok_or_else(|| CodecError::unexpected(kind.name(), "non-finite number")),
        other => Err(CodecError::unexpected(kind.name(), json_kind(other))),
    }
}

fn out_of_range(kind: PrimitiveKind, value: i64) -> CodecError {
    CodecError::OutOfRange {
        kind: kind.name().to_string(),
        value: value.to_string(),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
