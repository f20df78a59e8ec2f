//! Type descriptor resolution
//!
//! Turns an opaque record into its ordered field descriptors. Declaration
//! order is preserved; every consumer (accessor, renderer) walks fields in
//! the order returned here.

use crate::error::ResolveError;
use crate::reflect::{Described, Reflect};
use crate::shape::{FieldDescriptor, Shape};

/// Field descriptors of `record`, in declaration order.
///
/// Fails with `UnsupportedShape` unless the record is a struct with at least
/// one named field.
pub fn resolve(record: &dyn Reflect) -> Result<&[FieldDescriptor], ResolveError> {
    resolve_shape(record.shape())
}

/// Field descriptors of a statically known type
pub fn resolve_type<T: Described>() -> Result<&'static [FieldDescriptor], ResolveError> {
    resolve_shape(T::describe())
}

/// Field descriptors of a shape
pub fn resolve_shape(shape: &Shape) -> Result<&[FieldDescriptor], ResolveError> {
    if !shape.is_flat_aggregate() {
        tracing::debug!(shape = shape.type_path(), kind = %shape.kind(), "rejecting shape");
        return Err(ResolveError::UnsupportedShape {
            shape: shape.name().to_string(),
            kind: shape.kind(),
        });
    }
    tracing::debug!(shape = shape.type_path(), fields = shape.len(), "resolved shape");
    Ok(shape.fields())
}
