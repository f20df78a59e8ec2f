//! Field kinds and field values
//!
//! Every field of a shape is classified into one of a closed set of
//! primitive kinds. Consumers match on [`FieldKind`] exhaustively, so a new
//! kind cannot be added without every formatter deciding what to do with it.
//!
//! ## Classification
//!
//! | Kind          | Rust types                                               |
//! |---------------|----------------------------------------------------------|
//! | `Integer`     | `i8 i16 i32 i64 i128 isize u8 u16 u32 u64 usize`          |
//! | `Text`        | `String`, `Box<str>`, `Cow<str>`                          |
//! | `Boolean`     | `bool`                                                   |
//! | `Unsupported` | everything else (floats, `u128`, `char`, references, ...) |

use std::fmt;

use serde::Serialize;

/// Primitive kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Signed or unsigned integer up to 64 bits (and `i128`)
    Integer,
    /// Owned UTF-8 text
    Text,
    /// `true` / `false`
    Boolean,
    /// No value representation; must be rejected by consumers
    Unsupported,
}

impl FieldKind {
    /// Classify a type name.
    ///
    /// Accepts the Rust primitive names as well as the SQL-ish aliases used
    /// in `refract.toml`. Matching is case-insensitive. Unknown names are
    /// `Unsupported`, never an error.
    pub fn classify(type_name: &str) -> Self {
        match type_name.trim().to_ascii_lowercase().as_str() {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "usize" | "int" | "integer" | "bigint" | "smallint" => FieldKind::Integer,
            "string" | "box<str>" | "cow<str>" | "text" | "varchar" => FieldKind::Text,
            "bool" | "boolean" => FieldKind::Boolean,
            _ => FieldKind::Unsupported,
        }
    }

    /// Lowercase name of the kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Text => "text",
            FieldKind::Boolean => "boolean",
            FieldKind::Unsupported => "unsupported",
        }
    }

    /// Whether values of this kind can be read and written
    pub const fn has_value(&self) -> bool {
        !matches!(self, FieldKind::Unsupported)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value currently stored in a field
///
/// Integers are widened to `i128` so that every supported integer type,
/// `u64` included, is read without loss. Writes narrow back to the field's
/// concrete type and fail with `OutOfRange` when the value does not fit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer-kinded field
    Integer(i128),
    /// Text-kinded field
    Text(String),
    /// Boolean-kinded field
    Boolean(bool),
    /// Field whose kind has no value representation
    Unsupported {
        /// Declared type of the field
        type_name: String,
    },
}

impl FieldValue {
    /// Kind tag of this value
    pub const fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Unsupported { .. } => FieldKind::Unsupported,
        }
    }

    /// Zero value of a kind: `0`, `""`, `false`
    pub fn zero(kind: FieldKind, type_name: &str) -> Self {
        match kind {
            FieldKind::Integer => FieldValue::Integer(0),
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Boolean(false),
            FieldKind::Unsupported => FieldValue::Unsupported {
                type_name: type_name.to_string(),
            },
        }
    }

    /// Get as integer
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a command-line style literal into a value of `kind`.
    ///
    /// Text is taken verbatim; integers and booleans must parse cleanly.
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Integer => raw.trim().parse::<i128>().ok().map(FieldValue::Integer),
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Some(FieldValue::Boolean(true)),
                "false" => Some(FieldValue::Boolean(false)),
                _ => None,
            },
            FieldKind::Unsupported => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Unsupported { type_name } => write!(f, "<{}>", type_name),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n as i128)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n as i128)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}
