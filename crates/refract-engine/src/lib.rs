//! Refract Engine
//!
//! Record introspection and insert-statement rendering:
//! - **Resolver**: ordered field descriptors of an opaque record (`resolve`)
//! - **Accessor**: positional reads and capability-gated writes (`access`)
//! - **Renderer**: kind-dispatched `insert into ... values(...)` (`render`)
//!
//! Records are anything implementing [`Reflect`]: structs using
//! `#[derive(Reflect)]`, or [`DynamicRecord`]s built from shapes declared at
//! run time.
//!
//! # Example
//!
//! ```rust,ignore
//! use refract_engine::{render, FieldValue, RecordMut, Reflect};
//!
//! #[derive(Reflect)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! let mut p = Person { name: "Samantha".into(), age: 29 };
//! assert_eq!(render(&p)?, r#"insert into Person values("Samantha", 29)"#);
//!
//! RecordMut::new(&mut p).set_named("age", FieldValue::Integer(30))?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Lets `#[derive(Reflect)]` expansions name this crate from its own tests.
#[cfg(test)]
extern crate self as refract_engine;

pub mod access;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod kind;
pub mod reflect;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod shape;

pub use access::{RecordMut, Value};
pub use config::{ConfigError, RefractConfig};
pub use dynamic::DynamicRecord;
pub use error::{AccessError, DecodeError, RenderError, ResolveError};
pub use kind::{FieldKind, FieldValue};
pub use reflect::{Described, Reflect};
pub use registry::ShapeRegistry;
pub use render::{render, BooleanLiteral, RenderOptions, Renderer};
pub use resolve::{resolve, resolve_type};
pub use shape::{FieldDescriptor, Shape, ShapeBuilder, ShapeKind};

#[doc(hidden)]
pub use reflect::__private;

#[cfg(feature = "derive")]
pub use refract_derive::Reflect;
