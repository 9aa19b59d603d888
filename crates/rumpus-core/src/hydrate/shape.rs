//! Coarse payload shapes, used in mismatch diagnostics.

use std::fmt;

use serde_json::Value;

/// The coarse kind of a payload value.
///
/// Mismatch errors report the shape that was expected against the shape
/// that was received; anything finer-grained (string formats, ranges) is
/// out of scope for hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A JSON string.
    Text,
    /// A JSON number with an integral value.
    Integer,
    /// A JSON boolean.
    Flag,
    /// A nested key/value payload.
    Record,
    /// An ordered sequence of payloads.
    List,
    /// JSON null.
    Null,
}

impl Shape {
    /// Classify a received payload value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Flag,
            Value::Number(_) => Shape::Integer,
            Value::String(_) => Shape::Text,
            Value::Array(_) => Shape::List,
            Value::Object(_) => Shape::Record,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Text => "text",
            Shape::Integer => "integer",
            Shape::Flag => "flag",
            Shape::Record => "record",
            Shape::List => "list",
            Shape::Null => "null",
        };
        f.write_str(name)
    }
}
