//! Registry of run-time shapes
//!
//! Holds the shapes declared in `refract.toml` (or registered by hand),
//! keyed by their short name, so that records can be built for a shape
//! chosen at run time.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::dynamic::DynamicRecord;
use crate::shape::Shape;

/// Registry of shapes by name
#[derive(Debug, Default, Clone)]
pub struct ShapeRegistry {
    shapes: FxHashMap<String, Arc<Shape>>,
}

impl ShapeRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape under its short name, replacing any previous one
    pub fn register(&mut self, shape: Shape) -> Arc<Shape> {
        let shape = Arc::new(shape);
        if self
            .shapes
            .insert(shape.name().to_string(), shape.clone())
            .is_some()
        {
            tracing::debug!(shape = shape.name(), "replaced registered shape");
        }
        shape
    }

    /// Get shape by name
    pub fn get(&self, name: &str) -> Option<&Arc<Shape>> {
        self.shapes.get(name)
    }

    /// Check if a shape is registered
    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Fresh zero-valued record of the named shape
    pub fn instantiate(&self, name: &str) -> Option<DynamicRecord> {
        self.get(name).cloned().map(DynamicRecord::instantiate)
    }

    /// Registered shapes sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Shape>> {
        let mut shapes: Vec<_> = self.shapes.values().collect();
        shapes.sort_by(|a, b| a.name().cmp(b.name()));
        shapes.into_iter()
    }

    /// Get number of registered shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
