//! Contract Codec
//!
//! A schema-directed value codec: converts runtime values (primitives,
//! fixed/nested arrays, and user-declared composite records) to and from a
//! canonical textual byte encoding. A registered [`TypeSchema`] drives the
//! conversion in both directions; the codec never inspects concrete value
//! types on its own.
//!
//! ## Features
//!
//! - **Schema-Directed**: encode and decode follow the passed-in schema
//!   exclusively, a closed dispatch over primitive/array/object shapes
//! - **Lossless Round Trips**: `from_buffer(to_buffer(v))` reproduces `v`,
//!   including full float precision and nested array shapes
//! - **Default Omission**: object properties at their default/zero value are
//!   left out of the encoded form and materialized again on decode
//! - **Explicit Registry**: composite types register once at start-up in a
//!   caller-owned [`TypeRegistry`], then serve concurrent lookups
//! - **Metadata Surface**: registered schemas render as OpenAPI-flavoured
//!   JSON components for contract metadata publication
//!
//! ## Wire format
//!
//! ```text
//! 42                              int32
//! 2.718281828459045               float64 (shortest exact text)
//! "hello"                         string, JSON-escaped
//! ["a","b","c"]                   char array
//! [[42,83],[83,42]]               nested int array
//! {"value":"Hello"}               object, defaults omitted
//! [{"value":"hello"},{"value":"world"}]
//! ```

pub mod codec;
pub mod error;
pub mod metadata;
pub mod registry;
pub mod schema;
pub mod value;

pub use codec::Codec;
pub use error::{CodecError, Result};
pub use metadata::MetadataBuilder;
pub use registry::{RegisteredType, TypeRegistry};
pub use schema::{PrimitiveKind, Property, TypeSchema};
pub use value::{DataType, ObjectValue, Value};
