//! Wire format of emitted lines.
use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
use opentelemetry::Context;
use opentelemetry_stdout_logs::{attributes, LogEmitter, NoCorrelation, Severity, Value};
use serde_json::json;

fn emit_one(
    cx: &impl opentelemetry_stdout_logs::CorrelationProvider,
    severity: Severity,
    body: &str,
    attributes: Option<opentelemetry_stdout_logs::Attributes>,
) -> serde_json::Value {
    let emitter = LogEmitter::builder()
        .with_service_name("svc")
        .with_service_version("1.0")
        .with_writer(Vec::new())
        .build();
    emitter.emit(cx, severity, body, attributes);

    let output = String::from_utf8(emitter.into_inner()).expect("output is utf-8");
    assert_eq!(output.matches('\n').count(), 1, "exactly one line: {output}");
    assert!(output.ends_with('\n'));
    serde_json::from_str(output.trim_end()).expect("line is a json document")
}

fn log_record(json: &serde_json::Value) -> &serde_json::Value {
    &json["resourceLogs"][0]["scopeLogs"][0]["logRecords"][0]
}

fn span_context(flags: TraceFlags) -> SpanContext {
    SpanContext::new(
        TraceId::from_hex("5b8efff798038103d269b633813fc60c").unwrap(),
        SpanId::from_hex("eee19b7ec3c1b174").unwrap(),
        flags,
        true,
        TraceState::default(),
    )
}

#[test]
fn info_with_attributes() {
    let json = emit_one(
        &NoCorrelation,
        Severity::Info,
        "hello",
        Some(attributes! { "count" => 3, "ok" => true }),
    );
    let record = log_record(&json);

    assert_eq!(record["body"]["stringValue"], "hello");
    assert_eq!(record["severityText"], "INFO");
    assert_eq!(record["severityNumber"], 9);

    let attributes = record["attributes"].as_array().unwrap();
    assert_eq!(attributes.len(), 2);
    assert!(attributes.contains(&json!({"key": "count", "value": {"intValue": "3"}})));
    assert!(attributes.contains(&json!({"key": "ok", "value": {"boolValue": true}})));
}

#[test]
fn timestamps_are_equal_decimal_strings() {
    let json = emit_one(&NoCorrelation, Severity::Debug, "tick", None);
    let record = log_record(&json);

    let time = record["timeUnixNano"].as_str().expect("timestamp is a string");
    assert!(time.parse::<u64>().unwrap() > 0);
    assert_eq!(record["observedTimeUnixNano"], record["timeUnixNano"]);
}

#[test]
fn absent_fields_are_omitted() {
    let json = emit_one(&NoCorrelation, Severity::Warn, "plain", None);
    let record = log_record(&json).as_object().unwrap();

    for key in ["attributes", "traceId", "spanId", "flags"] {
        assert!(!record.contains_key(key), "{key} must be omitted");
    }
    assert!(!json.to_string().contains("null"));
}

#[test]
fn resource_and_scope() {
    let json = emit_one(&NoCorrelation, Severity::Error, "boom", None);
    let resource_logs = &json["resourceLogs"][0];

    assert_eq!(
        resource_logs["resource"]["attributes"],
        json!([
            {"key": "service.name", "value": {"stringValue": "svc"}},
            {"key": "service.version", "value": {"stringValue": "1.0"}},
            {"key": "telemetry.sdk.name", "value": {"stringValue": "opentelemetry-stdout-logs"}},
            {"key": "telemetry.sdk.language", "value": {"stringValue": "rust"}},
            {"key": "telemetry.sdk.version", "value": {"stringValue": env!("CARGO_PKG_VERSION")}},
        ])
    );
    assert_eq!(
        resource_logs["scopeLogs"][0]["scope"],
        json!({"name": "opentelemetry-stdout-logs", "version": env!("CARGO_PKG_VERSION")})
    );
    assert_eq!(resource_logs["scopeLogs"][0]["logRecords"].as_array().unwrap().len(), 1);
}

#[test]
fn valid_span_is_correlated() {
    let cx = Context::new().with_remote_span_context(span_context(TraceFlags::SAMPLED));
    let json = emit_one(&cx, Severity::Info, "in span", None);
    let record = log_record(&json);

    // base64 of 5b8efff798038103d269b633813fc60c and eee19b7ec3c1b174
    assert_eq!(record["traceId"], "W47/95gDgQPSabYzgT/GDA==");
    assert_eq!(record["spanId"], "7uGbfsPBsXQ=");
    assert_eq!(record["flags"], 1);
}

#[test]
fn unsampled_span_omits_zero_flags() {
    let cx = Context::new().with_remote_span_context(span_context(TraceFlags::default()));
    let json = emit_one(&cx, Severity::Info, "in span", None);
    let record = log_record(&json).as_object().unwrap();

    assert_eq!(record["traceId"], "W47/95gDgQPSabYzgT/GDA==");
    assert_eq!(record["spanId"], "7uGbfsPBsXQ=");
    assert!(!record.contains_key("flags"));
}

#[test]
fn invalid_span_is_not_correlated() {
    let cx = Context::new().with_remote_span_context(SpanContext::empty_context());
    let json = emit_one(&cx, Severity::Info, "no span", None);
    let record = log_record(&json).as_object().unwrap();

    assert!(!record.contains_key("traceId"));
    assert!(!record.contains_key("spanId"));
    assert!(!record.contains_key("flags"));
}

#[test]
fn nested_values() {
    let json = emit_one(
        &NoCorrelation,
        Severity::Info,
        "nested",
        Some(attributes! {
            "list" => vec![Value::from("a"), Value::from(1.5), Value::from(vec![true])],
            "bytes" => b"Hello, World!".as_slice(),
            "map" => std::collections::BTreeMap::from([("inner", u64::MAX)]),
            "nan" => f64::NAN,
        }),
    );
    let attributes = log_record(&json)["attributes"].as_array().unwrap().clone();
    let value_of = |key: &str| {
        attributes
            .iter()
            .find(|kv| kv["key"] == key)
            .map(|kv| kv["value"].clone())
            .unwrap()
    };

    assert_eq!(
        value_of("list"),
        json!({"arrayValue": {"values": [
            {"stringValue": "a"},
            {"doubleValue": 1.5},
            {"arrayValue": {"values": [{"boolValue": true}]}},
        ]}})
    );
    assert_eq!(value_of("bytes"), json!({"bytesValue": "SGVsbG8sIFdvcmxkIQ=="}));
    assert_eq!(
        value_of("map"),
        json!({"kvlistValue": {"values": [{"key": "inner", "value": {"intValue": "-1"}}]}})
    );
    assert_eq!(value_of("nan"), json!({"doubleValue": "NaN"}));
}

#[test]
fn empty_list_and_map_have_no_values_field() {
    let json = emit_one(
        &NoCorrelation,
        Severity::Info,
        "empty",
        Some(attributes! {
            "empty_list" => Value::List(vec![]),
            "empty_map" => Value::Map(Default::default()),
        }),
    );
    let attributes = log_record(&json)["attributes"].as_array().unwrap();

    assert!(attributes.contains(&json!({"key": "empty_list", "value": {"arrayValue": {}}})));
    assert!(attributes.contains(&json!({"key": "empty_map", "value": {"kvlistValue": {}}})));
    assert!(!json.to_string().contains(r#""values":[]"#));
}

#[test]
fn trace_ids_decode_to_source_bytes() {
    use base64::prelude::{Engine, BASE64_STANDARD};

    let cx = Context::new().with_remote_span_context(span_context(TraceFlags::SAMPLED));
    let json = emit_one(&cx, Severity::Debug, "ids", None);
    let record = log_record(&json);

    let trace_id = BASE64_STANDARD
        .decode(record["traceId"].as_str().unwrap())
        .unwrap();
    let span_id = BASE64_STANDARD
        .decode(record["spanId"].as_str().unwrap())
        .unwrap();
    assert_eq!(const_hex::encode(trace_id), "5b8efff798038103d269b633813fc60c");
    assert_eq!(const_hex::encode(span_id), "eee19b7ec3c1b174");
}
