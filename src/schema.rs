//! Schema types and structures
//!
//! A [`TypeSchema`] is an immutable, recursively-structured description of a
//! value's shape. It is built once (by hand, by codegen, or through the
//! [`DataType`](crate::value::DataType) trait) and drives the codec in both
//! directions; the codec never inspects concrete value types on its own.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The primitive value kinds the codec understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Char,
    String,
    Byte,
}

impl PrimitiveKind {
    /// Get the wire-facing name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Int32 => "int32",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Float32 => "float32",
            PrimitiveKind::Float64 => "float64",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "string",
            PrimitiveKind::Byte => "byte",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named property of a composite type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name as it appears on the wire
    pub name: String,
    /// Shape of the property's value
    pub schema: TypeSchema,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, schema: TypeSchema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// A structural description of a value's shape
///
/// Equality is structural: two schemas compare equal when they describe the
/// same shape, regardless of how or when they were constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSchema {
    /// A single primitive value
    Primitive(PrimitiveKind),
    /// A homogeneous, arbitrarily nestable sequence
    Array(Box<TypeSchema>),
    /// A named composite with properties in declaration order
    Object {
        name: String,
        properties: Vec<Property>,
    },
}

impl TypeSchema {
    /// Schema for an array of `element`
    pub fn array(element: TypeSchema) -> Self {
        TypeSchema::Array(Box::new(element))
    }

    /// Schema for a named composite with the given properties, in order
    pub fn object(
        name: impl Into<String>,
        properties: impl IntoIterator<Item = Property>,
    ) -> Self {
        TypeSchema::Object {
            name: name.into(),
            properties: properties.into_iter().collect(),
        }
    }

    /// A bare reference to a registered composite type
    ///
    /// Carries only the name. The codec resolves every object schema through
    /// the registry, so a reference and a fully-populated schema behave
    /// identically at encode/decode time.
    pub fn reference(name: impl Into<String>) -> Self {
        TypeSchema::Object {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// The composite type name, if this is an object schema
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeSchema::Object { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The element schema, if this is an array schema
    pub fn element(&self) -> Option<&TypeSchema> {
        match self {
            TypeSchema::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Look up a declared property by name, if this is an object schema
    pub fn property(&self, name: &str) -> Option<&Property> {
        match self {
            TypeSchema::Object { properties, .. } => properties.iter().find(|p| p.name == name),
            _ => None,
        }
    }

    /// Short human-readable description of the shape, for error messages
    pub fn describe(&self) -> String {
        match self {
            TypeSchema::Primitive(kind) => kind.name().to_string(),
            TypeSchema::Array(element) => format!("array of {}", element.describe()),
            TypeSchema::Object { name, .. } => format!("object {}", name),
        }
    }
}
