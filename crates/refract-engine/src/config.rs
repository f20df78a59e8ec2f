//! Configuration file parsing (refract.toml)
//!
//! Declares run-time shapes and renderer settings:
//!
//! ```toml
//! [render]
//! booleans = "keyword"
//!
//! [[shapes]]
//! name = "Person"
//! path = "app::Person"
//! fields = [
//!   { name = "Name", type = "string" },
//!   { name = "Age",  type = "int" },
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::ShapeRegistry;
use crate::render::RenderOptions;
use crate::shape::Shape;

/// Default configuration file name
pub const CONFIG_FILE: &str = "refract.toml";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Contents of `refract.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefractConfig {
    /// Renderer settings
    #[serde(default)]
    pub render: RenderOptions,

    /// Declared shapes
    #[serde(default)]
    pub shapes: Vec<ShapeConfig>,
}

/// One declared shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeConfig {
    /// Short name, used as the statement's target identifier
    pub name: String,

    /// Module-qualified name (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Fields in declaration order
    pub fields: Vec<FieldConfig>,
}

/// One declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Field name
    pub name: String,

    /// Type name, classified with `FieldKind::classify`
    #[serde(rename = "type")]
    pub type_name: String,
}

impl RefractConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: RefractConfig = content.parse()?;
        tracing::debug!(path = %path.display(), shapes = config.shapes.len(), "loaded config");
        Ok(config)
    }

    /// Check names for emptiness and duplicates
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut shape_names = HashSet::new();
        for shape in &self.shapes {
            if shape.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "shape name cannot be empty".to_string(),
                ));
            }
            if !shape_names.insert(shape.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "shape '{}' is declared more than once",
                    shape.name
                )));
            }
            if shape.fields.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "shape '{}' has no fields",
                    shape.name
                )));
            }

            let mut field_names = HashSet::new();
            for field in &shape.fields {
                if field.name.trim().is_empty() {
                    return Err(ConfigError::ValidationError(format!(
                        "shape '{}' has a field with an empty name",
                        shape.name
                    )));
                }
                if !field_names.insert(field.name.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "field '{}' is declared more than once in shape '{}'",
                        field.name, shape.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Registry holding every declared shape
    pub fn registry(&self) -> ShapeRegistry {
        let mut registry = ShapeRegistry::new();
        for shape in &self.shapes {
            registry.register(shape.to_shape());
        }
        registry
    }
}

impl FromStr for RefractConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: RefractConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl ShapeConfig {
    /// Build the descriptor table
    pub fn to_shape(&self) -> Shape {
        let path = self.path.as_deref().unwrap_or(&self.name);
        self.fields
            .iter()
            .fold(Shape::builder(self.name.as_str(), path), |builder, field| {
                builder.typed_field(field.name.as_str(), &field.type_name)
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FieldKind;
    use crate::render::BooleanLiteral;

    const SAMPLE: &str = r#"
[render]
booleans = "numeric"

[[shapes]]
name = "Person"
path = "app::Person"
fields = [
  { name = "Name", type = "string" },
  { name = "Age", type = "int" },
]

[[shapes]]
name = "Reading"
fields = [
  { name = "id", type = "u32" },
  { name = "value", type = "float" },
]
"#;

    #[test]
    fn test_parse_sample() {
        let config: RefractConfig = SAMPLE.parse().unwrap();
        assert_eq!(config.render.booleans, BooleanLiteral::Numeric);
        assert_eq!(config.shapes.len(), 2);
        assert_eq!(config.shapes[0].fields[1].type_name, "int");
    }

    #[test]
    fn test_registry_from_config() {
        let config: RefractConfig = SAMPLE.parse().unwrap();
        let registry = config.registry();

        let person = registry.get("Person").unwrap();
        assert_eq!(person.type_path(), "app::Person");
        assert_eq!(person.field(0).unwrap().kind, FieldKind::Text);
        assert_eq!(person.field(1).unwrap().kind, FieldKind::Integer);

        let reading = registry.get("Reading").unwrap();
        assert_eq!(reading.type_path(), "Reading");
        assert_eq!(reading.field(1).unwrap().kind, FieldKind::Unsupported);
    }

    #[test]
    fn test_defaults() {
        let config: RefractConfig = "".parse().unwrap();
        assert_eq!(config.render.booleans, BooleanLiteral::Reject);
        assert!(config.shapes.is_empty());
    }

    #[test]
    fn test_duplicate_shape_rejected() {
        let toml = r#"
[[shapes]]
name = "A"
fields = [{ name = "x", type = "int" }]

[[shapes]]
name = "A"
fields = [{ name = "y", type = "int" }]
"#;
        let err = toml.parse::<RefractConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("more than once")));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let toml = r#"
[[shapes]]
name = "A"
fields = [{ name = "x", type = "int" }, { name = "x", type = "text" }]
"#;
        assert!(matches!(
            toml.parse::<RefractConfig>(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_shape_rejected() {
        let toml = r#"
[[shapes]]
name = "A"
fields = []
"#;
        assert!(matches!(
            toml.parse::<RefractConfig>(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("no fields")
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let toml = r#"
[render]
quotes = "single"
"#;
        assert!(matches!(
            toml.parse::<RefractConfig>(),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, SAMPLE).unwrap();

        let config = RefractConfig::load(&path).unwrap();
        assert_eq!(config.shapes[0].name, "Person");

        assert!(matches!(
            RefractConfig::load(&dir.path().join("missing.toml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
