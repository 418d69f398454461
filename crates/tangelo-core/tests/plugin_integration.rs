//! Integration tests covering how a plugin uses the library: checking the
//! host version, building accessors from its configuration, and reporting
//! errors.

use serde_json::{json, Value};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tangelo_core::{
    accessor, version, Accessor, AccessorKind, AccessorSpec, Error, FatalHandler, ParsedVersion,
    Tangelo, TangeloConfig, AJAX_FAILURE,
};

fn host(version: &str) -> Tangelo {
    Tangelo::from_config(TangeloConfig {
        version: version.to_string(),
        ..TangeloConfig::default()
    })
}

/// Plugin configuration as it would arrive from a page
fn plugin_options() -> Value {
    json!({
        "x": {"field": "position.lon"},
        "y": {"field": "position.lat"},
        "size": {"value": 5},
        "label": {"index": true},
        "color": {}
    })
}

fn records() -> Vec<Value> {
    vec![
        json!({"name": "Albany", "position": {"lon": -73.75, "lat": 42.65}}),
        json!({"name": "Troy", "position": {"lon": -73.69}}),
        json!({"name": "Nowhere"}),
    ]
}

#[test]
fn test_plugin_accessors_over_sparse_records() {
    let options = plugin_options();
    let x = accessor(options.get("x")).unwrap();
    let y = accessor(options.get("y")).unwrap();
    let size = accessor(options.get("size")).unwrap();
    let label = accessor(options.get("label")).unwrap();
    let color = accessor(options.get("color")).unwrap();
    let missing = accessor(options.get("opacity")).unwrap();

    let xs: Vec<_> = records()
        .iter()
        .map(|r| x.get(r).unwrap())
        .collect();
    assert_eq!(xs, vec![Some(json!(-73.75)), Some(json!(-73.69)), None]);

    let ys: Vec<_> = records()
        .iter()
        .map(|r| y.get(r).unwrap())
        .collect();
    assert_eq!(ys, vec![Some(json!(42.65)), None, None]);

    for (i, record) in records().iter().enumerate() {
        assert_eq!(size.call(record, Some(i)).unwrap(), Some(json!(5)));
        assert_eq!(label.call(record, Some(i)).unwrap(), Some(json!(i)));
    }

    // The plugin can branch on the flag instead of calling blindly
    assert!(color.is_undefined());
    assert!(missing.is_undefined());
    assert!(matches!(color.get(&records()[0]), Err(Error::UndefinedAccessor)));
}

#[test]
fn test_invalid_spec_fails_at_compile_time() {
    let err = accessor(Some(&json!({"feild": "name"}))).unwrap_err();
    assert!(err.to_string().contains("unknown accessor spec"));
}

#[test]
fn test_custom_accessor_passes_through() {
    let upper = Accessor::from_fn(|record, _| {
        record
            .get("name")
            .and_then(Value::as_str)
            .map(|s| Value::String(s.to_uppercase()))
    });
    let compiled = Accessor::compile(AccessorSpec::from(upper.clone()));

    assert_eq!(compiled.kind(), &AccessorKind::Custom);
    assert_eq!(
        compiled.get(&records()[1]).unwrap(),
        Some(json!("TROY"))
    );
    assert_eq!(upper.get(&records()[1]).unwrap(), compiled.get(&records()[1]).unwrap());
}

#[test]
fn test_accessors_shared_across_threads() {
    let name = accessor(Some(&json!({"field": "name"}))).unwrap();
    let handles: Vec<_> = records()
        .into_iter()
        .map(|record| {
            let name = name.clone();
            std::thread::spawn(move || name.get(&record).unwrap())
        })
        .collect();

    let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        names,
        vec![Some(json!("Albany")), Some(json!("Troy")), Some(json!("Nowhere"))]
    );
}

#[test]
fn test_version_requirements() {
    let t = host("1.3.2");
    assert!(t.require_compatible_version("1"));
    assert!(t.require_compatible_version("1.3"));
    assert!(t.require_compatible_version("1.3.2"));
    assert!(!t.require_compatible_version("1.3.3"));
    assert!(!t.require_compatible_version("2"));
    assert!(!t.require_compatible_version("1.3.2-rc1"));

    let t = host("0.7-dev");
    assert!(t.require_compatible_version("0.7-dev"));
    assert!(!t.require_compatible_version("0.6"));
}

#[test]
fn test_accessors_built_in_code() {
    let lat = Accessor::compile(AccessorSpec::field("position.lat"));
    let size = Accessor::compile(AccessorSpec::value(5));

    let values: Vec<_> = records()
        .iter()
        .map(|r| (lat.get(r).unwrap(), size.get(r).unwrap()))
        .collect();
    assert_eq!(
        values,
        vec![
            (Some(json!(42.65)), Some(json!(5))),
            (None, Some(json!(5))),
            (None, Some(json!(5))),
        ]
    );
    assert_eq!(lat.kind(), &AccessorKind::Field("position.lat".to_string()));
}

#[test]
fn test_parsed_versions_compared_directly() {
    let host: ParsedVersion = "1.3.2".parse().unwrap();
    assert!(version::is_compatible(&"1.3".parse().unwrap(), &host));
    assert!(!version::is_compatible(&"1.4".parse().unwrap(), &host));
    assert!(!version::is_compatible(&"0.7-dev".parse().unwrap(), &"0.7".parse().unwrap()));
}

struct RecordingHandler;

impl FatalHandler for RecordingHandler {
    fn fatal(&self, module: Option<&str>, message: &str) -> ! {
        panic!("recorded: {:?} {}", module, message);
    }
}

#[test]
fn test_custom_fatal_handler_receives_module_and_message() {
    let t = host("1.0.0").with_fatal_handler(Arc::new(RecordingHandler));
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| t.require_compatible_version("one")));
    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert_eq!(
        message,
        r#"recorded: Some("tangelo.requireCompatibleVersion()") invalid version string: one"#
    );
}

#[test]
fn test_unavailable_dependency_uses_handler() {
    let t = Tangelo::new().with_fatal_handler(Arc::new(RecordingHandler));
    let stub = t.unavailable("mapping", &["jQuery", "d3", "Google Maps API"]);
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| stub.invoke()));
    let message = result
        .unwrap_err()
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert_eq!(
        message,
        "recorded: None JavaScript include error: mapping requires jQuery, d3, and Google Maps API"
    );
}

#[test]
fn test_in_band_error_round_trips_through_json() {
    let err = Tangelo::new()
        .error(AJAX_FAILURE)
        .with_context(json!({"status": 500, "responseText": "boom"}));
    let text = serde_json::to_string(&err).unwrap();
    let back: tangelo_core::AppError = serde_json::from_str(&text).unwrap();
    assert_eq!(back, err);
}

#[test]
fn test_config_from_yaml() {
    let config: TangeloConfig = serde_yaml::from_str(
        "version: 1.2.0\napi_root: /svc\nerror_messages:\n  4: stale session\n",
    )
    .unwrap();
    let t = Tangelo::from_config(config);
    assert_eq!(t.api_root(), "/svc");
    assert_eq!(t.error(4).message, "stale session");
    assert!(t.require_compatible_version("1.1"));
}
