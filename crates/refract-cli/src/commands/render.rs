//! `refract render`: Render JSON records as insert statements.
//!
//! Input is one JSON object or an array of objects. Every record is decoded,
//! patched with the `--set` assignments through an addressable handle, and
//! rendered. Nothing is printed unless every record renders.

use anyhow::{anyhow, bail, Context};
use refract_engine::{
    BooleanLiteral, DynamicRecord, FieldValue, RecordMut, RefractConfig, Renderer, Shape,
};
use std::io::Read;

use super::lookup;
use crate::output::StyledOutput;

pub fn execute(
    config: &RefractConfig,
    name: &str,
    input: &str,
    assignments: &[String],
    booleans: Option<BooleanLiteral>,
    out: &mut StyledOutput,
) -> anyhow::Result<()> {
    let registry = config.registry();
    let shape = lookup(&registry, name)?;
    let assignments = parse_assignments(&shape, assignments)?;

    let text = read_input(input)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing JSON from {}", input))?;
    let items = match json {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let mut options = config.render.clone();
    if let Some(booleans) = booleans {
        options.booleans = booleans;
    }
    let renderer = Renderer::new(options);

    let mut statements = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mut record = DynamicRecord::from_json(shape.clone(), item)
            .with_context(|| format!("record {}", index))?;

        let mut handle = RecordMut::new(&mut record);
        for (position, value) in &assignments {
            handle
                .set(*position, value.clone())
                .with_context(|| format!("record {}", index))?;
        }

        statements.push(
            renderer
                .render(&record)
                .with_context(|| format!("record {}", index))?,
        );
    }

    tracing::info!(shape = shape.name(), records = statements.len(), "rendered");
    for statement in &statements {
        out.line(statement);
    }
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}

/// Parse `field=value` pairs against the shape's declared kinds.
fn parse_assignments(shape: &Shape, raw: &[String]) -> anyhow::Result<Vec<(usize, FieldValue)>> {
    raw.iter()
        .map(|assignment| -> anyhow::Result<(usize, FieldValue)> {
            let (name, literal) = assignment
                .split_once('=')
                .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{}'", assignment))?;
            let Some(field) = shape.field_named(name) else {
                bail!("{} has no field named '{}'", shape.name(), name);
            };
            let value = FieldValue::parse(field.kind, literal).ok_or_else(|| {
                anyhow!(
                    "cannot set {} field '{}' to '{}'",
                    field.kind,
                    field.name,
                    literal
                )
            })?;
            Ok((field.position, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use refract_engine::FieldKind;

    fn person() -> Shape {
        Shape::builder("Person", "Person")
            .field("Name", FieldKind::Text, "string")
            .field("Age", FieldKind::Integer, "int")
            .field("Score", FieldKind::Unsupported, "float")
            .build()
    }

    #[test]
    fn test_parse_assignments() {
        let parsed = parse_assignments(
            &person(),
            &["Name=Will".to_string(), "Age=54".to_string(), "Name=a=b".to_string()],
        )
        .unwrap();
        assert_eq!(
            parsed,
            vec![
                (0, FieldValue::from("Will")),
                (1, FieldValue::Integer(54)),
                (0, FieldValue::from("a=b")),
            ]
        );
    }

    #[test]
    fn test_parse_assignment_errors() {
        assert!(parse_assignments(&person(), &["Name".to_string()]).is_err());
        assert!(parse_assignments(&person(), &["Height=3".to_string()]).is_err());
        assert!(parse_assignments(&person(), &["Age=old".to_string()]).is_err());
        assert!(parse_assignments(&person(), &["Score=1.5".to_string()]).is_err());
    }
}
