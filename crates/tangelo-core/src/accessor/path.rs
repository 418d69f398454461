//! Dotted field paths
//!
//! A field path is either the identity sentinel `"."` or a sequence of
//! property names separated by dots. Resolution walks object keys; numeric
//! segments also index into arrays. A missing step yields `None`.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// `"."`: the record itself
    Identity,
    /// `"a.b.c"`
    Segments(Vec<String>),
}

impl FieldPath {
    pub fn parse(field: &str) -> Self {
        if field == "." {
            FieldPath::Identity
        } else {
            FieldPath::Segments(field.split('.').map(str::to_string).collect())
        }
    }

    pub fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            FieldPath::Identity => Some(record),
            FieldPath::Segments(segments) => segments
                .iter()
                .try_fold(record, |current, segment| lookup(current, segment)),
        }
    }
}

fn lookup<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Identity => write!(f, "."),
            FieldPath::Segments(segments) => write!(f, "{}", segments.join(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse() {
        assert_eq!(FieldPath::parse("."), FieldPath::Identity);
        assert_eq!(
            FieldPath::parse("lemons.car"),
            FieldPath::Segments(vec!["lemons".to_string(), "car".to_string()])
        );
        assert_eq!(FieldPath::parse("lemons.car").to_string(), "lemons.car");
    }

    #[test]
    fn test_resolve_nested() {
        let data = json!({"lemons": {"car": "jalopy", "fruit": "citrus"}});
        assert_eq!(
            FieldPath::parse("lemons.car").resolve(&data),
            Some(&json!("jalopy"))
        );
        assert_eq!(FieldPath::parse("lemons.boat").resolve(&data), None);
        assert_eq!(FieldPath::parse("limes.car").resolve(&data), None);
        assert_eq!(FieldPath::parse("lemons.car.wheels").resolve(&data), None);
    }

    #[test]
    fn test_resolve_null_and_arrays() {
        let data = json!({"a": null, "list": [{"x": 1}, {"x": 2}]});
        assert_eq!(FieldPath::parse("a").resolve(&data), Some(&Value::Null));
        assert_eq!(FieldPath::parse("a.b").resolve(&data), None);
        assert_eq!(FieldPath::parse("list.1.x").resolve(&data), Some(&json!(2)));
        assert_eq!(FieldPath::parse("list.5.x").resolve(&data), None);
        assert_eq!(FieldPath::parse("list.first").resolve(&data), None);
    }

    #[test]
    fn test_identity() {
        assert_eq!(FieldPath::Identity.resolve(&json!(4)), Some(&json!(4)));
    }
}
