//! Field access with explicit addressability
//!
//! Reading goes through [`Value`], which may wrap a shared reference, an
//! owned copy, or a mutable reference. Writing needs a [`RecordMut`], the
//! mutable capability, which can only be obtained from `&mut` access to the
//! original record:
//!
//! ```ignore
//! let mut p = Person { name: "Bob".into(), age: 35 };
//!
//! // A copy reads fine but refuses writes.
//! let mut copy = Value::copied(p.clone());
//! assert!(matches!(copy.set(0, "Will".into()), Err(AccessError::NotAddressable { .. })));
//!
//! // A mutable reference hands out the capability.
//! let mut handle = RecordMut::new(&mut p);
//! handle.set(0, "Will".into())?;
//! ```

use crate::error::{AccessError, ResolveError};
use crate::kind::FieldValue;
use crate::reflect::Reflect;
use crate::resolve::resolve;
use crate::shape::{FieldDescriptor, Shape};

/// Current value of the field at `position`.
///
/// Never fails for a position below the shape's field count.
pub fn get(record: &dyn Reflect, position: usize) -> Result<FieldValue, AccessError> {
    record.field(position).ok_or_else(|| AccessError::NoSuchField {
        shape: record.shape().name().to_string(),
        position,
    })
}

/// Current value of the field called `name`
pub fn get_named(record: &dyn Reflect, name: &str) -> Result<FieldValue, AccessError> {
    let position = position_of(record.shape(), name)?;
    get(record, position)
}

/// Overwrite the field at `position` through a mutable capability
pub fn set(
    handle: &mut RecordMut<'_>,
    position: usize,
    value: FieldValue,
) -> Result<(), AccessError> {
    handle.set(position, value)
}

fn position_of(shape: &Shape, name: &str) -> Result<usize, AccessError> {
    shape.field_index(name).ok_or_else(|| AccessError::UnknownField {
        shape: shape.name().to_string(),
        name: name.to_string(),
    })
}

// ============================================================================
// Value
// ============================================================================

enum Target<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect + 'a>),
    Addressable(&'a mut dyn Reflect),
}

/// Read handle on a record, optionally addressable
pub struct Value<'a> {
    target: Target<'a>,
}

impl<'a> Value<'a> {
    /// Read-only view of a borrowed record
    pub fn of(record: &'a dyn Reflect) -> Self {
        Self {
            target: Target::Borrowed(record),
        }
    }

    /// Read-only view of a record passed by value.
    ///
    /// The value is a copy: writes through it would never reach the
    /// caller's record, so they are refused with `NotAddressable`.
    pub fn copied<R: Reflect + 'a>(record: R) -> Self {
        Self {
            target: Target::Owned(Box::new(record)),
        }
    }

    /// Addressable view of the original record
    pub fn of_mut(record: &'a mut dyn Reflect) -> Self {
        Self {
            target: Target::Addressable(record),
        }
    }

    fn record(&self) -> &dyn Reflect {
        match &self.target {
            Target::Borrowed(record) => *record,
            Target::Owned(record) => &**record,
            Target::Addressable(record) => &**record,
        }
    }

    /// Descriptor table of the record
    pub fn shape(&self) -> &Shape {
        self.record().shape()
    }

    /// Field descriptors in declaration order
    pub fn fields(&self) -> Result<&[FieldDescriptor], ResolveError> {
        resolve(self.record())
    }

    /// Current value at `position`
    pub fn get(&self, position: usize) -> Result<FieldValue, AccessError> {
        get(self.record(), position)
    }

    /// Current value of the field called `name`
    pub fn get_named(&self, name: &str) -> Result<FieldValue, AccessError> {
        get_named(self.record(), name)
    }

    /// Whether this value is backed by a mutable reference
    pub fn can_set(&self) -> bool {
        matches!(self.target, Target::Addressable(_))
    }

    /// Mutable capability over the original record.
    ///
    /// Fails with `NotAddressable` for borrowed or copied values.
    pub fn addressable(&mut self) -> Result<RecordMut<'_>, AccessError> {
        match &mut self.target {
            Target::Addressable(record) => Ok(RecordMut::new(&mut **record)),
            Target::Borrowed(record) => Err(not_addressable(record.shape())),
            Target::Owned(record) => Err(not_addressable(record.shape())),
        }
    }

    /// Overwrite the field at `position`
    pub fn set(&mut self, position: usize, value: FieldValue) -> Result<(), AccessError> {
        self.addressable()?.set(position, value)
    }

    /// Overwrite the field called `name`
    pub fn set_named(&mut self, name: &str, value: FieldValue) -> Result<(), AccessError> {
        self.addressable()?.set_named(name, value)
    }
}

fn not_addressable(shape: &Shape) -> AccessError {
    tracing::warn!(shape = shape.type_path(), "write through a non-addressable value");
    AccessError::NotAddressable {
        shape: shape.name().to_string(),
    }
}

// ============================================================================
// RecordMut
// ============================================================================

/// Exclusive, temporary write access to a record
pub struct RecordMut<'a> {
    record: &'a mut dyn Reflect,
}

impl<'a> RecordMut<'a> {
    /// Capability over `record`
    pub fn new(record: &'a mut dyn Reflect) -> Self {
        Self { record }
    }

    /// Descriptor table of the record
    pub fn shape(&self) -> &Shape {
        self.record.shape()
    }

    /// Current value at `position`
    pub fn get(&self, position: usize) -> Result<FieldValue, AccessError> {
        get(&*self.record, position)
    }

    /// Current value of the field called `name`
    pub fn get_named(&self, name: &str) -> Result<FieldValue, AccessError> {
        get_named(&*self.record, name)
    }

    /// Overwrite the field at `position`; other fields are untouched.
    ///
    /// The value's tag must match the declared kind. Unsupported fields
    /// cannot be written.
    pub fn set(&mut self, position: usize, value: FieldValue) -> Result<(), AccessError> {
        let expected = match self.record.shape().field(position) {
            Some(field) => field.kind,
            None => {
                return Err(AccessError::NoSuchField {
                    shape: self.record.shape().name().to_string(),
                    position,
                })
            }
        };
        if expected != value.kind() || !expected.has_value() {
            let err = AccessError::rejected(self.record.shape(), position, value.kind());
            tracing::warn!(error = %err, "field write rejected");
            return Err(err);
        }

        tracing::trace!(shape = self.record.shape().type_path(), position, "field write");
        self.record.set_field(position, value)
    }

    /// Overwrite the field called `name`
    pub fn set_named(&mut self, name: &str, value: FieldValue) -> Result<(), AccessError> {
        let position = position_of(self.record.shape(), name)?;
        self.set(position, value)
    }

    /// Copy every field of `source` into this record.
    ///
    /// Both records must share a layout (same type path and descriptors) and
    /// every field must have a value representation. All or nothing: when a
    /// write is refused, the fields already copied get their old values back.
    pub fn assign(&mut self, source: &dyn Reflect) -> Result<(), AccessError> {
        let target = self.record.shape();
        if !target.same_layout(source.shape()) {
            return Err(AccessError::ShapeMismatch {
                expected: target.type_path().to_string(),
                found: source.shape().type_path().to_string(),
            });
        }
        if let Some(field) = target.fields().iter().find(|f| !f.kind.has_value()) {
            let err = AccessError::UnsupportedField {
                shape: target.name().to_string(),
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            };
            tracing::warn!(error = %err, "assignment rejected");
            return Err(err);
        }

        let len = target.len();
        let values = (0..len)
            .map(|position| get(source, position))
            .collect::<Result<Vec<_>, _>>()?;
        let previous = (0..len)
            .map(|position| get(&*self.record, position))
            .collect::<Result<Vec<_>, _>>()?;

        for (position, value) in values.into_iter().enumerate() {
            if let Err(err) = self.record.set_field(position, value) {
                tracing::warn!(error = %err, position, "assignment rolled back");
                for (restored, old) in previous.into_iter().enumerate().take(position) {
                    // Values read back from this record are always accepted again.
                    let _ = self.record.set_field(restored, old);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
