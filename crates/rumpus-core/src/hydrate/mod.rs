//! Hydration: turning untyped service payloads into typed records.
//!
//! Payloads arrive as loosely-typed nested JSON. Each record type
//! declares its own schema by implementing [`Hydrate`]: field by field it
//! names the wire key, the expected shape, and (for nested payloads) the
//! record type that hydrates it. Routing is therefore qualified by the
//! enclosing record, so two schemas sharing a wire name (`settings` on a
//! user vs. `settings` on a room) never collide.
//!
//! The engine is a single generic tree walk: [`from_value`] constructs
//! one record and recurses through its declared nested fields,
//! [`from_list`] does the same for ordered sequences. Termination is by
//! construction — the declared schemas form an acyclic graph. A mismatch
//! anywhere fails the whole enclosing record with the offending
//! [`FieldPath`]; fields with no declared route pass through untyped.

mod path;
mod shape;

pub use path::FieldPath;
pub use shape::Shape;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SchemaMismatch;

/// A record type that can be hydrated from an untyped payload.
pub trait Hydrate: Sized {
    /// Record name used in diagnostics.
    const NAME: &'static str;

    /// Construct the record from its declared fields.
    ///
    /// Implementations pull each declared field out of `fields`; the
    /// accessors record the full path on failure. Keys left untaken fall
    /// under the unknown-key policy applied by [`from_value`].
    fn hydrate(fields: &mut Fields) -> Result<Self, SchemaMismatch>;
}

/// Hydrate a record of type `T` from a payload value.
///
/// The value must be a nested key/value payload; anything else is a
/// shape mismatch at `path`. Unknown keys are logged at `debug` level
/// and ignored — they are never an error.
pub fn from_value<T: Hydrate>(value: Value, path: FieldPath) -> Result<T, SchemaMismatch> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(SchemaMismatch::Shape {
                path,
                expected: Shape::Record,
                received: Shape::of(&other),
            });
        }
    };

    let mut fields = Fields { map, path };
    let record = T::hydrate(&mut fields)?;
    fields.finish(T::NAME);
    Ok(record)
}

/// Hydrate an ordered sequence of records of type `T`.
///
/// Order is preserved: element `i` of the output is hydrated from
/// element `i` of the input. An empty sequence yields an empty vector.
/// A malformed element fails with its index in the path, e.g. `list[2]`.
pub fn from_list<T: Hydrate>(value: Value, path: &FieldPath) -> Result<Vec<T>, SchemaMismatch> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(SchemaMismatch::Shape {
                path: path.clone(),
                expected: Shape::List,
                received: Shape::of(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| from_value(item, path.index(i)))
        .collect()
}

/// One-shot reader over a payload's key/value map during hydration.
///
/// Each accessor removes the key it reads, so whatever remains after
/// [`Hydrate::hydrate`] returns is, by definition, unknown to the schema.
pub struct Fields {
    map: Map<String, Value>,
    path: FieldPath,
}

impl Fields {
    /// The path of the record currently being hydrated.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// A required string field. Absent or null is a missing-field error.
    pub fn required_str(&mut self, key: &str) -> Result<String, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Err(self.missing(key)),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.shape(key, Shape::Text, &other)),
        }
    }

    /// An optional string field. Absent or null is `None`.
    pub fn opt_str(&mut self, key: &str) -> Result<Option<String>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.shape(key, Shape::Text, &other)),
        }
    }

    /// A string field with a default for absent or null values.
    pub fn str_or(&mut self, key: &str, default: &str) -> Result<String, SchemaMismatch> {
        Ok(self.opt_str(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// A boolean field. Absent or null defaults to `false` here, at
    /// construction time — downstream consumers never see a missing flag.
    pub fn flag(&mut self, key: &str) -> Result<bool, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(self.shape(key, Shape::Flag, &other)),
        }
    }

    /// A required unsigned integer field.
    pub fn required_u32(&mut self, key: &str) -> Result<u32, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Err(self.missing(key)),
            Some(value) => self.as_u32(key, value),
        }
    }

    /// An optional unsigned integer field.
    pub fn opt_u32(&mut self, key: &str) -> Result<Option<u32>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.as_u32(key, value).map(Some),
        }
    }

    /// An optional signed integer field.
    pub fn opt_i64(&mut self, key: &str) -> Result<Option<i64>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match value.as_i64() {
                Some(n) => Ok(Some(n)),
                None => Err(self.shape(key, Shape::Integer, &value)),
            },
        }
    }

    /// An optional nested record field, hydrated into `T`.
    ///
    /// This is the routing declaration: the enclosing schema names the
    /// target type for this wire key. Absent or null is `None`.
    pub fn record<T: Hydrate>(&mut self, key: &str) -> Result<Option<T>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => from_value(value, self.path.child(key)).map(Some),
        }
    }

    /// A required nested record field, hydrated into `T`.
    pub fn required_record<T: Hydrate>(&mut self, key: &str) -> Result<T, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Err(self.missing(key)),
            Some(value) => from_value(value, self.path.child(key)),
        }
    }

    /// A required sequence field, each element hydrated into `T`.
    /// An empty sequence is valid.
    pub fn list<T: Hydrate>(&mut self, key: &str) -> Result<Vec<T>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Err(self.missing(key)),
            Some(value) => from_list(value, &self.path.child(key)),
        }
    }

    /// A sequence field that defaults to empty when absent or null.
    pub fn list_or_empty<T: Hydrate>(&mut self, key: &str) -> Result<Vec<T>, SchemaMismatch> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => from_list(value, &self.path.child(key)),
        }
    }

    /// An intentionally unrouted field, passed through untyped.
    pub fn raw(&mut self, key: &str) -> Option<Value> {
        match self.map.remove(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Apply the unknown-key policy: log leftovers once, then drop them.
    fn finish(self, record: &'static str) {
        if !self.map.is_empty() {
            let keys: Vec<&str> = self.map.keys().map(String::as_str).collect();
            debug!(record, path = %self.path, ?keys, "ignoring unknown payload keys");
        }
    }

    fn missing(&self, key: &str) -> SchemaMismatch {
        SchemaMismatch::Missing {
            path: self.path.child(key),
        }
    }

    fn shape(&self, key: &str, expected: Shape, received: &Value) -> SchemaMismatch {
        SchemaMismatch::Shape {
            path: self.path.child(key),
            expected,
            received: Shape::of(received),
        }
    }

    fn as_u32(&self, key: &str, value: Value) -> Result<u32, SchemaMismatch> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| self.shape(key, Shape::Integer, &value))
    }
}
