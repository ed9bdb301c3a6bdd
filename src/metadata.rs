//! Contract metadata publication surface
//!
//! The metadata collaborator reads registered schemas and renders them as
//! OpenAPI-flavoured JSON components. This module only exposes the read-only
//! view; assembling and publishing the full metadata document belongs to the
//! embedding system.

use serde_json::{json, Map, Value as Json};

use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::schema::{PrimitiveKind, TypeSchema};

/// Renders registered schemas as metadata components
#[derive(Debug, Clone, Copy)]
pub struct MetadataBuilder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> MetadataBuilder<'r> {
    /// Create a builder over a registry
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Render one registered type as a metadata component
    pub fn component(&self, name: &str) -> Result<Json> {
        let registered = self.registry.lookup(name)?;
        let mut properties = Map::new();
        for property in registered.properties() {
            properties.insert(property.name.clone(), schema_json(&property.schema));
        }
        Ok(json!({
            "$id": registered.name,
            "type": "object",
            "properties": properties,
        }))
    }

    /// Render every registered type, keyed by name
    ///
    /// Names are emitted in sorted order so repeated publication of the same
    /// registry is byte-identical.
    pub fn components(&self) -> Json {
        let mut components = Map::new();
        for name in self.registry.type_names() {
            if let Ok(component) = self.component(name) {
                components.insert(name.to_string(), component);
            }
        }
        Json::Object(components)
    }
}

/// Render a schema as OpenAPI-flavoured JSON
///
/// Composite references render as `$ref` entries; the referenced component is
/// published separately.
pub fn schema_json(schema: &TypeSchema) -> Json {
    match schema {
        TypeSchema::Primitive(kind) => match kind {
            PrimitiveKind::Boolean => json!({"type": "boolean"}),
            PrimitiveKind::Int32 => json!({"type": "integer", "format": "int32"}),
            PrimitiveKind::Int64 => json!({"type": "integer", "format": "int64"}),
            PrimitiveKind::Float32 => json!({"type": "number", "format": "float"}),
            PrimitiveKind::Float64 => json!({"type": "number", "format": "double"}),
            PrimitiveKind::Char => json!({"type": "string", "minLength": 1, "maxLength": 1}),
            PrimitiveKind::String => json!({"type": "string"}),
            PrimitiveKind::Byte => json!({"type": "integer", "format": "int8"}),
        },
        TypeSchema::Array(element) => json!({
            "type": "array",
            "items": schema_json(element),
        }),
        TypeSchema::Object { name, .. } => json!({
            "$ref": format!("#/components/schemas/{}", name),
        }),
    }
}
