//! The record abstraction
//!
//! [`Reflect`] is the only thing the engine knows about a record: a shape
//! table plus positional field reads and writes. Implementations come from
//! `#[derive(Reflect)]`, from [`DynamicRecord`](crate::DynamicRecord), or
//! from the scalar impls below (which resolve to an unsupported shape).

use once_cell::sync::Lazy;

use crate::error::AccessError;
use crate::kind::FieldValue;
use crate::shape::Shape;

/// A record whose fields can be enumerated, read and written by position.
///
/// `field` must return `Some` for every position below `shape().len()`.
/// `set_field` must leave the record unchanged when it returns an error.
pub trait Reflect {
    /// Descriptor table of this record
    fn shape(&self) -> &Shape;

    /// Current value at `position`, `None` past the last field
    fn field(&self, position: usize) -> Option<FieldValue>;

    /// Overwrite the field at `position`
    fn set_field(&mut self, position: usize, value: FieldValue) -> Result<(), AccessError>;
}

/// A record type whose shape is known without an instance
pub trait Described: Reflect {
    /// Shared descriptor table of the type
    fn describe() -> &'static Shape;
}

macro_rules! scalar_reflect {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn shape(&self) -> &Shape {
                    <$ty as Described>::describe()
                }

                fn field(&self, _position: usize) -> Option<FieldValue> {
                    None
                }

                fn set_field(
                    &mut self,
                    position: usize,
                    value: FieldValue,
                ) -> Result<(), AccessError> {
                    Err(AccessError::rejected(self.shape(), position, value.kind()))
                }
            }

            impl Described for $ty {
                fn describe() -> &'static Shape {
                    static SHAPE: Lazy<Shape> = Lazy::new(|| Shape::scalar(stringify!($ty)));
                    &SHAPE
                }
            }
        )*
    };
}

scalar_reflect!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

/// Support code for `#[derive(Reflect)]` expansions. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;

    use crate::error::AccessError;
    use crate::shape::Shape;

    /// Narrow an integer write to the field's concrete type
    pub fn integer<T: TryFrom<i128>>(
        shape: &Shape,
        position: usize,
        value: i128,
    ) -> Result<T, AccessError> {
        T::try_from(value).map_err(|_| {
            let (field, type_name) = shape
                .field(position)
                .map(|f| (f.name.clone(), f.type_name.clone()))
                .unwrap_or_default();
            AccessError::OutOfRange {
                field,
                type_name,
                value,
            }
        })
    }
}
