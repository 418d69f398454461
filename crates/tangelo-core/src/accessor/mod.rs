//! Declarative data accessors
//!
//! An [`Accessor`] is compiled once from an [`AccessorSpec`] and then called
//! with `(record, index)` pairs from anywhere in the application. Records are
//! arbitrary JSON values; a missing field resolves to `None` rather than an
//! error, since records are expected to be sparse.
//!
//! ```
//! use serde_json::json;
//! use tangelo_core::accessor::accessor;
//!
//! let car = accessor(Some(&json!({"field": "lemons.car"}))).unwrap();
//! let data = json!({"lemons": {"car": "jalopy"}});
//!
//! assert_eq!(car.get(&data).unwrap(), Some(json!("jalopy")));
//! assert_eq!(car.get(&json!({})).unwrap(), None);
//! ```

pub mod path;
pub mod spec;

pub use path::FieldPath;
pub use spec::AccessorSpec;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};

type AccessorFn = dyn Fn(&Value, Option<usize>) -> Option<Value> + Send + Sync;

/// What an accessor was compiled from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorKind {
    Undefined,
    Value,
    Index,
    Identity,
    Field(String),
    Custom,
}

/// A compiled data accessor
#[derive(Clone)]
pub struct Accessor {
    kind: AccessorKind,
    func: Arc<AccessorFn>,
}

impl Accessor {
    /// Compile a spec into an accessor
    pub fn compile(spec: AccessorSpec) -> Self {
        match spec {
            AccessorSpec::Callable(original) => {
                let kind = original.kind.clone();
                let inner = original.func;
                Self {
                    kind,
                    func: Arc::new(move |record: &Value, index: Option<usize>| {
                        inner(record, index)
                    }),
                }
            }
            AccessorSpec::Value(value) => Self {
                kind: AccessorKind::Value,
                func: Arc::new(move |_: &Value, _: Option<usize>| Some(value.clone())),
            },
            AccessorSpec::Index => Self {
                kind: AccessorKind::Index,
                func: Arc::new(|_: &Value, index: Option<usize>| index.map(Value::from)),
            },
            AccessorSpec::Field(FieldPath::Identity) => Self {
                kind: AccessorKind::Identity,
                func: Arc::new(|record: &Value, _: Option<usize>| Some(record.clone())),
            },
            AccessorSpec::Field(path) => Self {
                kind: AccessorKind::Field(path.to_string()),
                func: Arc::new(move |record: &Value, _: Option<usize>| {
                    path.resolve(record).cloned()
                }),
            },
        }
    }

    /// The accessor produced for a missing or empty spec. Calling it fails.
    pub fn undefined() -> Self {
        Self {
            kind: AccessorKind::Undefined,
            func: Arc::new(|_: &Value, _: Option<usize>| None),
        }
    }

    /// Wrap a caller-supplied function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Value, Option<usize>) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            kind: AccessorKind::Custom,
            func: Arc::new(f),
        }
    }

    /// Apply the accessor to a record and its optional position
    pub fn call(&self, record: &Value, index: Option<usize>) -> Result<Option<Value>> {
        if self.is_undefined() {
            return Err(Error::UndefinedAccessor);
        }
        Ok((self.func)(record, index))
    }

    /// Apply the accessor to a record with no index
    pub fn get(&self, record: &Value) -> Result<Option<Value>> {
        self.call(record, None)
    }

    pub fn is_undefined(&self) -> bool {
        self.kind == AccessorKind::Undefined
    }

    pub fn kind(&self) -> &AccessorKind {
        &self.kind
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("kind", &self.kind).finish()
    }
}

/// Compile an accessor from its JSON configuration.
///
/// `None`, non-objects, and `{}` give the undefined accessor. An object with
/// none of the recognized keys is rejected here rather than when called.
pub fn accessor(spec: Option<&Value>) -> Result<Accessor> {
    let decoded = match spec {
        Some(spec) => AccessorSpec::from_json(spec)?,
        None => None,
    };

    let compiled = match decoded {
        Some(spec) => Accessor::compile(spec),
        None => Accessor::undefined(),
    };

    debug!(kind = ?compiled.kind(), "Compiled accessor");
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "oranges": "tangelos",
            "lemons": {
                "car": "jalopy",
                "fruit": "citrus"
            }
        })
    }

    #[test]
    fn test_undefined_accessor() {
        let undef1 = accessor(None).unwrap();
        let undef2 = accessor(Some(&json!({}))).unwrap();

        assert!(undef1.is_undefined());
        assert!(undef2.is_undefined());
        assert!(matches!(undef1.get(&data()), Err(Error::UndefinedAccessor)));
        assert!(matches!(undef2.call(&data(), Some(1)), Err(Error::UndefinedAccessor)));
    }

    #[test]
    fn test_defined_accessor_is_not_flagged() {
        let value = accessor(Some(&json!({"value": 10}))).unwrap();
        assert!(!value.is_undefined());
        assert_eq!(value.kind(), &AccessorKind::Value);
    }

    #[test]
    fn test_value_spec() {
        let value = accessor(Some(&json!({"value": 10}))).unwrap();
        assert_eq!(value.get(&data()).unwrap(), Some(json!(10)));
        assert_eq!(value.call(&Value::Null, Some(3)).unwrap(), Some(json!(10)));
    }

    #[test]
    fn test_index_spec() {
        let index = accessor(Some(&json!({"index": true}))).unwrap();
        assert_eq!(index.call(&data(), Some(5)).unwrap(), Some(json!(5)));
        assert_eq!(index.get(&data()).unwrap(), None);
    }

    #[test]
    fn test_field_spec() {
        let field1 = accessor(Some(&json!({"field": "oranges"}))).unwrap();
        let field2 = accessor(Some(&json!({"field": "lemons.car"}))).unwrap();
        let field3 = accessor(Some(&json!({"field": "."}))).unwrap();

        assert_eq!(field1.get(&data()).unwrap(), Some(json!("tangelos")));
        assert_eq!(field2.get(&data()).unwrap(), Some(json!("jalopy")));
        assert_eq!(field2.get(&json!({})).unwrap(), None);
        assert_eq!(field3.get(&json!(4)).unwrap(), Some(json!(4)));
        assert_eq!(field2.kind(), &AccessorKind::Field("lemons.car".to_string()));
        assert_eq!(field3.kind(), &AccessorKind::Identity);
    }

    #[test]
    fn test_unknown_spec() {
        let err = accessor(Some(&json!({"invalid": "quux"}))).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedAccessorSpec { .. }));
    }

    #[test]
    fn test_clone_a_function_twice() {
        let identity = Accessor::from_fn(|record, _| Some(record.clone()));
        let once = Accessor::compile(AccessorSpec::Callable(identity));
        let twice = Accessor::compile(once.into());

        assert_eq!(twice.get(&json!(10)).unwrap(), Some(json!(10)));
        assert_eq!(twice.kind(), &AccessorKind::Custom);
    }

    #[test]
    fn test_cloned_undefined_accessor_keeps_flag() {
        let copy = Accessor::compile(Accessor::undefined().into());
        assert!(copy.is_undefined());
        assert!(copy.get(&data()).is_err());
    }

    #[test]
    fn test_accessor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Accessor>();
    }
}
