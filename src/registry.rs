//! Type Registry
//!
//! Maps composite type names to their registered schemas. The registry is an
//! explicit value with an owner-determined lifetime: the owner registers every
//! declared type during start-up (`&mut self`), then shares the registry by
//! reference with the codec and the metadata builder. Lookups take `&self`, so
//! concurrent reads during the serving phase are safe by construction.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{CodecError, Result};
use crate::schema::{Property, TypeSchema};
use crate::value::DataType;

/// A registered composite type: its name and derived schema
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredType {
    /// The type name, unique within one registry
    pub name: String,
    /// The type's object schema
    pub schema: TypeSchema,
}

impl RegisteredType {
    /// The declared properties, in declaration order
    pub fn properties(&self) -> &[Property] {
        match &self.schema {
            TypeSchema::Object { properties, .. } => properties,
            // Registration only admits object schemas
            _ => &[],
        }
    }
}

/// The type registry
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, RegisteredType>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete composite type
    pub fn register<T: DataType>(&mut self) -> Result<()> {
        self.register_schema(T::type_schema())
    }

    /// Register an object schema under its own name
    ///
    /// Re-registering a name replaces the previous entry; the last
    /// registration wins.
    pub fn register_schema(&mut self, schema: TypeSchema) -> Result<()> {
        let name = match schema.name() {
            Some(name) => name.to_string(),
            None => {
                return Err(CodecError::unexpected("object schema", schema.describe()));
            }
        };

        let entry = RegisteredType {
            name: name.clone(),
            schema,
        };
        if self.types.insert(name.clone(), entry).is_some() {
            warn!(name = %name, "replacing registered type");
        } else {
            debug!(name = %name, "registered type");
        }
        Ok(())
    }

    /// Look up a registered type by name
    pub fn lookup(&self, name: &str) -> Result<&RegisteredType> {
        self.get(name).ok_or_else(|| CodecError::UnknownType {
            name: name.to_string(),
        })
    }

    /// Get a registered type by name, if present
    pub fn get(&self, name: &str) -> Option<&RegisteredType> {
        self.types.get(name)
    }

    /// Whether a type name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// All registered type names, sorted for deterministic publication
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PrimitiveKind, Property};

    fn asset_schema() -> TypeSchema {
        TypeSchema::object(
            "Asset",
            vec![Property::new(
                "value",
                TypeSchema::Primitive(PrimitiveKind::String),
            )],
        )
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register_schema(asset_schema()).unwrap();

        let entry = registry.lookup("Asset").unwrap();
        assert_eq!(entry.name, "Asset");
        assert_eq!(entry.schema, asset_schema());
        assert!(registry.contains("Asset"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_unregistered_fails() {
        let registry = TypeRegistry::new();
        let err = registry.lookup("Missing").unwrap_err();
        assert!(matches!(err, CodecError::UnknownType { ref name } if name == "Missing"));
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = TypeRegistry::new();
        registry.register_schema(asset_schema()).unwrap();

        let replacement = TypeSchema::object(
            "Asset",
            vec![Property::new(
                "value",
                TypeSchema::Primitive(PrimitiveKind::Int32),
            )],
        );
        registry.register_schema(replacement.clone()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Asset").unwrap().schema, replacement);
    }

    #[test]
    fn test_only_object_schemas_register() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .register_schema(TypeSchema::Primitive(PrimitiveKind::Int32))
            .unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_type_names_sorted() {
        let mut registry = TypeRegistry::new();
        registry
            .register_schema(TypeSchema::object("Zeta", vec![]))
            .unwrap();
        registry
            .register_schema(TypeSchema::object("Alpha", vec![]))
            .unwrap();
        assert_eq!(registry.type_names(), vec!["Alpha", "Zeta"]);
    }
}
