//! Error types for schema resolution and value conversion

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// The schema names a composite type that was never registered.
    #[error("type not registered: {name}")]
    UnknownType { name: String },

    /// The input carries a property the registered schema does not declare.
    #[error("unknown property '{property}' for type {type_name}")]
    UnknownProperty { type_name: String, property: String },

    /// A literal or value whose shape does not match the schema.
    #[error("expected {expected}, found {found}")]
    UnexpectedValue { expected: String, found: String },

    /// A char literal that is not exactly one character long.
    #[error("char literal must be exactly one character, found {found:?}")]
    InvalidChar { found: String },

    /// An integer literal outside the range of the target kind.
    #[error("value {value} out of range for {kind}")]
    OutOfRange { kind: String, value: String },

    /// Malformed input text: bad bracket/brace structure, premature end,
    /// invalid UTF-8 or an unparseable literal.
    #[error("malformed input: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        CodecError::UnexpectedValue {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
