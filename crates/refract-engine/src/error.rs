//! Error types for resolution, field access and rendering

use crate::kind::FieldKind;
use crate::shape::{Shape, ShapeKind};

/// Failure to enumerate a record's fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Record is not a flat aggregate of named fields
    #[error("Unsupported shape: {shape} is a {kind}, not a struct with named fields")]
    UnsupportedShape {
        /// Shape name
        shape: String,
        /// What the shape actually is
        kind: ShapeKind,
    },
}

/// Failure to read or write a field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// Mutation attempted on a value that is not backed by a mutable reference
    #[error("{shape} value is not addressable; pass a mutable reference to modify it")]
    NotAddressable {
        /// Shape name
        shape: String,
    },

    /// Written value's tag does not match the field's declared kind
    #[error("Kind mismatch on field '{field}': expected {expected}, got {found}")]
    KindMismatch {
        /// Field name
        field: String,
        /// Declared kind
        expected: FieldKind,
        /// Kind of the supplied value
        found: FieldKind,
    },

    /// Integer does not fit the field's concrete type
    #[error("Value {value} is out of range for field '{field}' ({type_name})")]
    OutOfRange {
        /// Field name
        field: String,
        /// Declared type of the field
        type_name: String,
        /// Rejected value
        value: i128,
    },

    /// Position past the last field
    #[error("{shape} has no field at position {position}")]
    NoSuchField {
        /// Shape name
        shape: String,
        /// Requested position
        position: usize,
    },

    /// Name lookup miss
    #[error("{shape} has no field named '{name}'")]
    UnknownField {
        /// Shape name
        shape: String,
        /// Requested name
        name: String,
    },

    /// Whole-record assignment over a field with no value representation
    #[error("Cannot copy field '{field}' of {shape}: {type_name} has no value representation")]
    UnsupportedField {
        /// Shape name
        shape: String,
        /// Field name
        field: String,
        /// Declared type of the field
        type_name: String,
    },

    /// Whole-record assignment between different shapes
    #[error("Cannot assign a {found} to a {expected}")]
    ShapeMismatch {
        /// Shape of the target
        expected: String,
        /// Shape of the source
        found: String,
    },
}

impl AccessError {
    /// Error for a write of `found` at `position` that a record refused.
    ///
    /// Positions past the end become `NoSuchField`; anything else is a kind
    /// mismatch against the declared field.
    pub fn rejected(shape: &Shape, position: usize, found: FieldKind) -> Self {
        match shape.field(position) {
            Some(field) => AccessError::KindMismatch {
                field: field.name.clone(),
                expected: field.kind,
                found,
            },
            None => AccessError::NoSuchField {
                shape: shape.name().to_string(),
                position,
            },
        }
    }
}

/// Failure to render a record as an insert statement
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Record is not a flat aggregate of named fields
    #[error(transparent)]
    UnsupportedShape(#[from] ResolveError),

    /// Field kind has no formatting rule
    #[error("Unsupported field kind: field '{field}' is {kind}")]
    UnsupportedFieldKind {
        /// Field name
        field: String,
        /// Kind that could not be formatted
        kind: FieldKind,
    },

    /// Reading a field failed
    #[error(transparent)]
    Access(#[from] AccessError),
}

/// Failure to build a dynamic record from JSON
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Input is not a JSON object
    #[error("Expected a JSON object for {shape}")]
    NotAnObject {
        /// Shape name
        shape: String,
    },

    /// Declared field absent from the input
    #[error("Missing field '{field}' for {shape}")]
    MissingField {
        /// Shape name
        shape: String,
        /// Field name
        field: String,
    },

    /// Input key that the shape does not declare
    #[error("Unknown field '{field}' for {shape}")]
    UnknownField {
        /// Shape name
        shape: String,
        /// Field name
        field: String,
    },

    /// Input value does not match the field's kind
    #[error("Invalid value for field '{field}': expected {expected}, got {found}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Declared kind
        expected: FieldKind,
        /// JSON rendering of the offending value
        found: String,
    },
}
