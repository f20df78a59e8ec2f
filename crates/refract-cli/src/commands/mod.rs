//! Subcommand implementations.

pub mod describe;
pub mod new;
pub mod render;
pub mod shapes;

use anyhow::{anyhow, Context};
use refract_engine::{RefractConfig, Shape, ShapeRegistry};
use std::path::Path;
use std::sync::Arc;

/// Load and validate `refract.toml`.
pub fn load_config(path: &Path) -> anyhow::Result<RefractConfig> {
    RefractConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

/// Look up a declared shape by name.
pub fn lookup(registry: &ShapeRegistry, name: &str) -> anyhow::Result<Arc<Shape>> {
    registry.get(name).cloned().ok_or_else(|| {
        let known: Vec<&str> = registry.iter().map(|s| s.name()).collect();
        anyhow!("unknown shape '{}' (declared: {})", name, known.join(", "))
    })
}
