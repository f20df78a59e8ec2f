//! Records whose shape is only known at run time
//!
//! A [`DynamicRecord`] pairs a shared [`Shape`] with one value slot per
//! field. It backs shapes declared in `refract.toml`, fresh instances of a
//! shape, and snapshots of other records.

use std::sync::Arc;

use crate::access;
use crate::error::{AccessError, DecodeError};
use crate::kind::{FieldKind, FieldValue};
use crate::reflect::Reflect;
use crate::shape::Shape;

/// Record backed by a run-time shape
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    shape: Arc<Shape>,
    values: Vec<FieldValue>,
}

impl DynamicRecord {
    /// New record of `shape` with every field at its zero value
    pub fn instantiate(shape: Arc<Shape>) -> Self {
        let values = shape
            .fields()
            .iter()
            .map(|field| FieldValue::zero(field.kind, &field.type_name))
            .collect();
        Self { shape, values }
    }

    /// Copy of any record, detached from the original
    pub fn snapshot(record: &dyn Reflect) -> Result<Self, AccessError> {
        let shape = Arc::new(record.shape().clone());
        let values = (0..shape.len())
            .map(|position| access::get(record, position))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { shape, values })
    }

    /// Build a record from a JSON object keyed by field name.
    ///
    /// Every declared field must be present and no other key is accepted.
    /// Values of unsupported fields are not interpreted.
    pub fn from_json(shape: Arc<Shape>, json: &serde_json::Value) -> Result<Self, DecodeError> {
        let object = json.as_object().ok_or_else(|| DecodeError::NotAnObject {
            shape: shape.name().to_string(),
        })?;

        if let Some(key) = object.keys().find(|key| !shape.has_field(key)) {
            return Err(DecodeError::UnknownField {
                shape: shape.name().to_string(),
                field: key.clone(),
            });
        }

        let mut values = Vec::with_capacity(shape.len());
        for field in shape.fields() {
            let raw = object.get(&field.name).ok_or_else(|| DecodeError::MissingField {
                shape: shape.name().to_string(),
                field: field.name.clone(),
            })?;
            let invalid = || DecodeError::InvalidValue {
                field: field.name.clone(),
                expected: field.kind,
                found: raw.to_string(),
            };

            let value = match field.kind {
                FieldKind::Integer => {
                    let n = raw
                        .as_i64()
                        .map(i128::from)
                        .or_else(|| raw.as_u64().map(i128::from))
                        .ok_or_else(invalid)?;
                    if !integer_fits(&field.type_name, n) {
                        return Err(invalid());
                    }
                    FieldValue::Integer(n)
                }
                FieldKind::Text => FieldValue::Text(raw.as_str().ok_or_else(invalid)?.to_string()),
                FieldKind::Boolean => FieldValue::Boolean(raw.as_bool().ok_or_else(invalid)?),
                FieldKind::Unsupported => FieldValue::zero(field.kind, &field.type_name),
            };
            values.push(value);
        }

        Ok(Self { shape, values })
    }

    /// Shared descriptor table
    pub fn shape_arc(&self) -> &Arc<Shape> {
        &self.shape
    }

    /// Values in declaration order
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

impl Reflect for DynamicRecord {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn field(&self, position: usize) -> Option<FieldValue> {
        self.values.get(position).cloned()
    }

    fn set_field(&mut self, position: usize, value: FieldValue) -> Result<(), AccessError> {
        let Some(field) = self.shape.field(position) else {
            return Err(AccessError::rejected(&self.shape, position, value.kind()));
        };
        if field.kind != value.kind() || !field.kind.has_value() {
            return Err(AccessError::rejected(&self.shape, position, value.kind()));
        }
        if let FieldValue::Integer(n) = value {
            if !integer_fits(&field.type_name, n) {
                return Err(AccessError::OutOfRange {
                    field: field.name.clone(),
                    type_name: field.type_name.clone(),
                    value: n,
                });
            }
        }

        self.values[position] = value;
        Ok(())
    }
}

/// Whether `n` fits the integer type called `type_name`.
///
/// Paths are matched on their last segment (`std::primitive::u8` is `u8`).
/// SQL-ish aliases follow the usual column widths; `int`, `integer` and
/// `bigint` are 64-bit.
fn integer_fits(type_name: &str, n: i128) -> bool {
    let base = type_name.rsplit("::").next().unwrap_or(type_name);
    let (min, max): (i128, i128) = match base.trim().to_ascii_lowercase().as_str() {
        "i8" => (i8::MIN.into(), i8::MAX.into()),
        "i16" | "smallint" => (i16::MIN.into(), i16::MAX.into()),
        "i32" => (i32::MIN.into(), i32::MAX.into()),
        "u8" => (0, u8::MAX.into()),
        "u16" => (0, u16::MAX.into()),
        "u32" => (0, u32::MAX.into()),
        "u64" | "usize" => (0, u64::MAX.into()),
        "i128" => (i128::MIN, i128::MAX),
        _ => (i64::MIN.into(), i64::MAX.into()),
    };
    (min..=max).contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employee_shape() -> Arc<Shape> {
        Arc::new(
            Shape::builder("Employee", "hr::Employee")
                .typed_field("ID", "int")
                .typed_field("Name", "string")
                .typed_field("Active", "bool")
                .typed_field("Level", "u8")
                .build(),
        )
    }

    #[test]
    fn test_instantiate_zero_values() {
        let record = DynamicRecord::instantiate(employee_shape());
        assert_eq!(
            record.values(),
            &[
                FieldValue::Integer(0),
                FieldValue::Text(String::new()),
                FieldValue::Boolean(false),
                FieldValue::Integer(0),
            ]
        );
    }

    #[test]
    fn test_instances_are_independent() {
        let shape = employee_shape();
        let mut first = DynamicRecord::instantiate(shape.clone());
        let second = DynamicRecord::instantiate(shape);

        first.set_field(1, FieldValue::from("Tom")).unwrap();
        assert_eq!(second.field(1), Some(FieldValue::Text(String::new())));
    }

    #[test]
    fn test_from_json() {
        let record = DynamicRecord::from_json(
            employee_shape(),
            &json!({"ID": 12, "Name": "Tom", "Active": true, "Level": 3}),
        )
        .unwrap();

        assert_eq!(record.field(0), Some(FieldValue::Integer(12)));
        assert_eq!(record.field(1), Some(FieldValue::from("Tom")));
        assert_eq!(record.field(2), Some(FieldValue::Boolean(true)));
    }

    #[test]
    fn test_from_json_errors() {
        let shape = employee_shape();

        assert!(matches!(
            DynamicRecord::from_json(shape.clone(), &json!([1, 2])),
            Err(DecodeError::NotAnObject { .. })
        ));
        assert!(matches!(
            DynamicRecord::from_json(shape.clone(), &json!({"ID": 1, "Name": "x", "Active": true})),
            Err(DecodeError::MissingField { field, .. }) if field == "Level"
        ));
        assert!(matches!(
            DynamicRecord::from_json(
                shape.clone(),
                &json!({"ID": 1, "Name": "x", "Active": true, "Level": 1, "Extra": 0})
            ),
            Err(DecodeError::UnknownField { field, .. }) if field == "Extra"
        ));
        assert!(matches!(
            DynamicRecord::from_json(
                shape.clone(),
                &json!({"ID": "one", "Name": "x", "Active": true, "Level": 1})
            ),
            Err(DecodeError::InvalidValue { expected: FieldKind::Integer, .. })
        ));
        assert!(matches!(
            DynamicRecord::from_json(
                shape,
                &json!({"ID": 1, "Name": "x", "Active": true, "Level": 300})
            ),
            Err(DecodeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_field_range_check() {
        let mut record = DynamicRecord::instantiate(employee_shape());

        let err = record.set_field(3, FieldValue::Integer(256)).unwrap_err();
        assert!(matches!(err, AccessError::OutOfRange { value: 256, .. }));
        assert_eq!(record.field(3), Some(FieldValue::Integer(0)));

        record.set_field(3, FieldValue::Integer(255)).unwrap();
        assert_eq!(record.field(3), Some(FieldValue::Integer(255)));
    }

    #[test]
    fn test_integer_fits_qualified_paths() {
        assert!(integer_fits("std::primitive::u8", 255));
        assert!(!integer_fits("std::primitive::u8", 300));
        assert!(!integer_fits("core::primitive::i16", 40_000));
        assert!(integer_fits("SMALLINT", -5));
        assert!(!integer_fits("u32", -1));
    }

    #[test]
    fn test_snapshot_keeps_qualified_width() {
        let shape = Arc::new(
            Shape::builder("Row", "app::Row")
                .field("name", FieldKind::Text, "String")
                .field("level", FieldKind::Integer, "std::primitive::u8")
                .build(),
        );
        let original = DynamicRecord::instantiate(shape);
        let mut copy = DynamicRecord::snapshot(&original).unwrap();

        let err = copy.set_field(1, FieldValue::Integer(300)).unwrap_err();
        assert!(matches!(err, AccessError::OutOfRange { value: 300, .. }));
        assert_eq!(copy.field(1), Some(FieldValue::Integer(0)));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut original = DynamicRecord::instantiate(employee_shape());
        original.set_field(1, FieldValue::from("Tom")).unwrap();

        let copy = DynamicRecord::snapshot(&original).unwrap();
        original.set_field(1, FieldValue::from("Sam")).unwrap();

        assert_eq!(copy.field(1), Some(FieldValue::from("Tom")));
        assert_eq!(copy.shape(), original.shape());
    }
}
