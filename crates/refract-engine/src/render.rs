//! Insert-statement rendering
//!
//! Renders a record as `insert into <Name> values(<v1>, <v2>, ...)`, one
//! positional literal per field in declaration order. Formatting is chosen
//! by field kind:
//!
//! | Kind          | Literal                                               |
//! |---------------|-------------------------------------------------------|
//! | `Integer`     | bare decimal, `-` prefix for negatives                |
//! | `Text`        | wrapped in `"`; no escaping is performed              |
//! | `Boolean`     | rejected by default, see [`BooleanLiteral`]           |
//! | `Unsupported` | rejected                                              |
//!
//! Rendering is all-or-nothing. Every field kind is checked before the first
//! literal is produced, so a rejected field never leaves a partial statement.
//!
//! Text is inserted verbatim. A value containing `"` yields a malformed
//! statement; callers must not feed untrusted text through this renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::access;
use crate::error::{AccessError, RenderError};
use crate::kind::{FieldKind, FieldValue};
use crate::reflect::Reflect;
use crate::resolve::resolve;
use crate::shape::FieldDescriptor;

/// How boolean fields are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanLiteral {
    /// No formatting rule; boolean fields fail the render
    #[default]
    Reject,
    /// `TRUE` / `FALSE`
    Keyword,
    /// `1` / `0`
    Numeric,
}

impl FromStr for BooleanLiteral {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(BooleanLiteral::Reject),
            "keyword" => Ok(BooleanLiteral::Keyword),
            "numeric" => Ok(BooleanLiteral::Numeric),
            other => Err(format!(
                "unknown boolean literal style '{}' (expected reject, keyword or numeric)",
                other
            )),
        }
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BooleanLiteral::Reject => "reject",
            BooleanLiteral::Keyword => "keyword",
            BooleanLiteral::Numeric => "numeric",
        };
        f.write_str(s)
    }
}

/// Renderer settings (`[render]` in `refract.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Boolean literal style
    pub booleans: BooleanLiteral,
}

/// Kind-dispatched insert-statement renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    /// Renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Active options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Whether fields of `kind` have a formatting rule
    pub fn supports(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Integer | FieldKind::Text => true,
            FieldKind::Boolean => self.options.booleans != BooleanLiteral::Reject,
            FieldKind::Unsupported => false,
        }
    }

    /// Render `record` as an insert statement
    pub fn render(&self, record: &dyn Reflect) -> Result<String, RenderError> {
        let fields = resolve(record)?;

        if let Some(field) = fields.iter().find(|field| !self.supports(field.kind)) {
            tracing::debug!(
                shape = record.shape().type_path(),
                field = field.name.as_str(),
                kind = %field.kind,
                "render rejected"
            );
            return Err(RenderError::UnsupportedFieldKind {
                field: field.name.clone(),
                kind: field.kind,
            });
        }

        let literals = fields
            .iter()
            .map(|field| {
                let value = access::get(record, field.position)?;
                self.literal(field, value)
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let statement = format!(
            "insert into {} values({})",
            record.shape().name(),
            literals.join(", ")
        );
        tracing::debug!(
            shape = record.shape().type_path(),
            fields = fields.len(),
            "rendered record"
        );
        Ok(statement)
    }

    fn literal(&self, field: &FieldDescriptor, value: FieldValue) -> Result<String, RenderError> {
        match (field.kind, value) {
            (FieldKind::Integer, FieldValue::Integer(n)) => Ok(n.to_string()),
            (FieldKind::Text, FieldValue::Text(s)) => Ok(format!("\"{}\"", s)),
            (FieldKind::Boolean, FieldValue::Boolean(b)) => match self.options.booleans {
                BooleanLiteral::Keyword => Ok(if b { "TRUE" } else { "FALSE" }.to_string()),
                BooleanLiteral::Numeric => Ok(if b { "1" } else { "0" }.to_string()),
                BooleanLiteral::Reject => Err(RenderError::UnsupportedFieldKind {
                    field: field.name.clone(),
                    kind: field.kind,
                }),
            },
            (FieldKind::Unsupported, _) => Err(RenderError::UnsupportedFieldKind {
                field: field.name.clone(),
                kind: field.kind,
            }),
            (expected, value) => Err(RenderError::Access(AccessError::KindMismatch {
                field: field.name.clone(),
                expected,
                found: value.kind(),
            })),
        }
    }
}

/// Render `record` with default options
pub fn render(record: &dyn Reflect) -> Result<String, RenderError> {
    Renderer::default().render(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::shape::{Shape, ShapeKind};
    use crate::DynamicRecord;
    use std::sync::Arc;

    fn record(shape: Shape, values: Vec<FieldValue>) -> DynamicRecord {
        let mut record = DynamicRecord::instantiate(Arc::new(shape));
        for (position, value) in values.into_iter().enumerate() {
            record.set_field(position, value).unwrap();
        }
        record
    }

    fn person(name: &str, age: i64) -> DynamicRecord {
        record(
            Shape::builder("Person", "app::Person")
                .field("Name", FieldKind::Text, "String")
                .field("Age", FieldKind::Integer, "i64")
                .build(),
            vec![name.into(), age.into()],
        )
    }

    #[test]
    fn test_render_person() {
        assert_eq!(
            render(&person("Samantha", 29)).unwrap(),
            r#"insert into Person values("Samantha", 29)"#
        );
    }

    #[test]
    fn test_render_negative_and_empty() {
        assert_eq!(
            render(&person("", -7)).unwrap(),
            r#"insert into Person values("", -7)"#
        );
    }

    #[test]
    fn test_text_is_not_escaped() {
        assert_eq!(
            render(&person(r#"a"b"#, 1)).unwrap(),
            r#"insert into Person values("a"b", 1)"#
        );
    }

    #[test]
    fn test_unsupported_field_fails_whole_render() {
        let shape = Shape::builder("Reading", "Reading")
            .field("id", FieldKind::Integer, "i32")
            .field("value", FieldKind::Unsupported, "f64")
            .build();
        let err = render(&DynamicRecord::instantiate(Arc::new(shape))).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedFieldKind {
                field: "value".to_string(),
                kind: FieldKind::Unsupported,
            }
        );
    }

    #[test]
    fn test_boolean_styles() {
        let shape = Shape::builder("Flag", "Flag")
            .field("id", FieldKind::Integer, "i32")
            .field("on", FieldKind::Boolean, "bool")
            .build();
        let flag = record(shape, vec![FieldValue::Integer(1), true.into()]);

        assert!(matches!(
            render(&flag),
            Err(RenderError::UnsupportedFieldKind { kind: FieldKind::Boolean, .. })
        ));

        let keyword = Renderer::new(RenderOptions { booleans: BooleanLiteral::Keyword });
        assert_eq!(keyword.render(&flag).unwrap(), "insert into Flag values(1, TRUE)");

        let numeric = Renderer::new(RenderOptions { booleans: BooleanLiteral::Numeric });
        assert_eq!(numeric.render(&flag).unwrap(), "insert into Flag values(1, 1)");
    }

    #[test]
    fn test_non_aggregate_fails() {
        assert_eq!(
            render(&"text".to_string()).unwrap_err(),
            RenderError::UnsupportedShape(ResolveError::UnsupportedShape {
                shape: "String".to_string(),
                kind: ShapeKind::Scalar,
            })
        );
    }

    #[test]
    fn test_boolean_literal_from_str() {
        assert_eq!("Keyword".parse::<BooleanLiteral>(), Ok(BooleanLiteral::Keyword));
        assert_eq!("numeric".parse::<BooleanLiteral>(), Ok(BooleanLiteral::Numeric));
        assert!("yes".parse::<BooleanLiteral>().is_err());
    }
}
