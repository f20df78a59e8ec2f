//! Shapes and field descriptors
//!
//! A [`Shape`] is the descriptor table of one record type: its declared
//! name, what kind of type it is, and its fields in declaration order.
//! Shapes of derived types are built once by `#[derive(Reflect)]` and cached
//! in a static; shapes of dynamic records are built from `refract.toml`.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::kind::FieldKind;

/// What kind of type a shape describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Struct with named fields
    Struct,
    /// Tuple struct
    Tuple,
    /// Unit struct
    Unit,
    /// Enum
    Enum,
    /// Primitive scalar
    Scalar,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShapeKind::Struct => "struct",
            ShapeKind::Tuple => "tuple struct",
            ShapeKind::Unit => "unit struct",
            ShapeKind::Enum => "enum",
            ShapeKind::Scalar => "scalar",
        };
        f.write_str(s)
    }
}

/// Metadata for one field of a shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Primitive kind
    pub kind: FieldKind,
    /// 0-based declaration index
    pub position: usize,
    /// Declared type, as written in source or config
    pub type_name: String,
}

/// Descriptor table for a record type
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    name: String,
    type_path: String,
    kind: ShapeKind,
    fields: Vec<FieldDescriptor>,
    #[serde(skip)]
    field_indices: FxHashMap<String, usize>,
}

impl Shape {
    /// Start a struct shape.
    ///
    /// `name` is the short declared identifier (`Person`); `type_path` is the
    /// module-qualified name (`app::Person`).
    pub fn builder(name: impl Into<String>, type_path: impl Into<String>) -> ShapeBuilder {
        ShapeBuilder::new(name.into(), type_path.into(), ShapeKind::Struct)
    }

    /// Shape without fields of the given kind
    pub fn opaque(name: impl Into<String>, type_path: impl Into<String>, kind: ShapeKind) -> Self {
        ShapeBuilder::new(name.into(), type_path.into(), kind).build()
    }

    /// Shape of a primitive scalar
    pub fn scalar(name: &str) -> Self {
        Self::opaque(name, name, ShapeKind::Scalar)
    }

    /// Short declared name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module-qualified name
    pub fn type_path(&self) -> &str {
        &self.type_path
    }

    /// Kind of type
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Field at `position`
    pub fn field(&self, position: usize) -> Option<&FieldDescriptor> {
        self.fields.get(position)
    }

    /// Position of the field called `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    /// Field called `name`
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.field_index(name).and_then(|i| self.fields.get(i))
    }

    /// Check if field exists
    pub fn has_field(&self, name: &str) -> bool {
        self.field_indices.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether this is a struct with at least one named field
    pub fn is_flat_aggregate(&self) -> bool {
        self.kind == ShapeKind::Struct && !self.fields.is_empty()
    }

    /// Same name and same field layout
    pub fn same_layout(&self, other: &Shape) -> bool {
        self.type_path == other.type_path && self.fields == other.fields
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind && self.same_layout(other)
    }
}

impl Eq for Shape {}

/// Incremental construction of a [`Shape`]
#[derive(Debug)]
pub struct ShapeBuilder {
    shape: Shape,
}

impl ShapeBuilder {
    fn new(name: String, type_path: String, kind: ShapeKind) -> Self {
        Self {
            shape: Shape {
                name,
                type_path,
                kind,
                fields: Vec::new(),
                field_indices: FxHashMap::default(),
            },
        }
    }

    /// Append a field; its position is the number of fields added before it
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        type_name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let position = self.shape.fields.len();
        self.shape.field_indices.insert(name.clone(), position);
        self.shape.fields.push(FieldDescriptor {
            name,
            kind,
            position,
            type_name: type_name.into(),
        });
        self
    }

    /// Append a field whose kind is classified from its type name
    pub fn typed_field(self, name: impl Into<String>, type_name: &str) -> Self {
        self.field(name, FieldKind::classify(type_name), type_name)
    }

    /// Finish the shape
    pub fn build(self) -> Shape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Shape {
        Shape::builder("Person", "app::Person")
            .field("Name", FieldKind::Text, "String")
            .field("Age", FieldKind::Integer, "i32")
            .build()
    }

    #[test]
    fn test_shape_fields() {
        let shape = person();

        assert_eq!(shape.name(), "Person");
        assert_eq!(shape.type_path(), "app::Person");
        assert_eq!(shape.kind(), ShapeKind::Struct);
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.field_index("Name"), Some(0));
        assert_eq!(shape.field_index("Age"), Some(1));
        assert_eq!(shape.field_index("unknown"), None);
        assert!(shape.has_field("Age"));
        assert!(!shape.has_field("age"));

        let age = shape.field(1).unwrap();
        assert_eq!(age.name, "Age");
        assert_eq!(age.kind, FieldKind::Integer);
        assert_eq!(age.position, 1);
        assert_eq!(age.type_name, "i32");
    }

    #[test]
    fn test_typed_field_classifies() {
        let shape = Shape::builder("Reading", "Reading")
            .typed_field("id", "bigint")
            .typed_field("value", "float")
            .build();

        assert_eq!(shape.field(0).unwrap().kind, FieldKind::Integer);
        assert_eq!(shape.field(1).unwrap().kind, FieldKind::Unsupported);
    }

    #[test]
    fn test_flat_aggregate() {
        assert!(person().is_flat_aggregate());
        assert!(!Shape::builder("Empty", "Empty").build().is_flat_aggregate());
        assert!(!Shape::scalar("i32").is_flat_aggregate());
        assert!(!Shape::opaque("Pair", "Pair", ShapeKind::Tuple).is_flat_aggregate());
    }

    #[test]
    fn test_shape_equality() {
        assert_eq!(person(), person());

        let other = Shape::builder("Person", "other::Person")
            .field("Name", FieldKind::Text, "String")
            .field("Age", FieldKind::Integer, "i32")
            .build();
        assert_ne!(person(), other);
    }
}
