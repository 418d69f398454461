//! Accessor specifications
//!
//! An accessor spec is written in configuration as a JSON object with one of
//! the keys `value`, `index`, or `field`:
//!
//! ```text
//! {"value": 10}          always 10
//! {"index": true}        the record's position
//! {"field": "a.b"}       record.a.b
//! {"field": "."}         the record itself
//! ```

use serde_json::Value;

use super::path::FieldPath;
use super::Accessor;
use crate::error::{Error, Result};

/// A decoded accessor specification
#[derive(Debug, Clone)]
pub enum AccessorSpec {
    /// Ignore the record and return a constant
    Value(Value),
    /// Return the index argument
    Index,
    /// Look up a dotted path in the record
    Field(FieldPath),
    /// An accessor compiled earlier
    Callable(Accessor),
}

impl AccessorSpec {
    /// Decode a spec from its JSON form.
    ///
    /// Returns `Ok(None)` for inputs that describe the undefined accessor:
    /// anything that is not an object, and the empty object. Keys are checked
    /// in the order `value`, `index`, `field`.
    pub fn from_json(spec: &Value) -> Result<Option<Self>> {
        let map = match spec {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Ok(None),
        };

        if let Some(value) = map.get("value") {
            return Ok(Some(AccessorSpec::Value(value.clone())));
        }

        if map.get("index").is_some_and(is_truthy) {
            return Ok(Some(AccessorSpec::Index));
        }

        if let Some(Value::String(field)) = map.get("field") {
            return Ok(Some(AccessorSpec::Field(FieldPath::parse(field))));
        }

        Err(Error::UnrecognizedAccessorSpec { spec: spec.clone() })
    }

    pub fn field(path: &str) -> Self {
        AccessorSpec::Field(FieldPath::parse(path))
    }

    pub fn value(value: impl Into<Value>) -> Self {
        AccessorSpec::Value(value.into())
    }
}

impl From<Accessor> for AccessorSpec {
    fn from(accessor: Accessor) -> Self {
        AccessorSpec::Callable(accessor)
    }
}

/// JavaScript-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
