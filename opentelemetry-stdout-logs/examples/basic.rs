//! run with `$ cargo run --example basic --all-features`
use std::collections::BTreeMap;

use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
use opentelemetry::Context;
use opentelemetry_stdout_logs::{attributes, global, ServiceIdentity, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    global::init_with_identity(ServiceIdentity::from_env())?;

    // No active span: the record carries no trace correlation.
    global::info(&Context::current(), "service started", None);

    let span_context = SpanContext::new(
        TraceId::from_hex("5b8efff798038103d269b633813fc60c")?,
        SpanId::from_hex("eee19b7ec3c1b174")?,
        TraceFlags::SAMPLED,
        true,
        TraceState::default(),
    );
    let cx = Context::new().with_remote_span_context(span_context);

    let mut limits = BTreeMap::new();
    limits.insert("cpu", 2);
    limits.insert("memory_mb", 512);

    global::warn(
        &cx,
        "request throttled",
        Some(attributes! {
            "http.route" => "/api/orders",
            "attempt" => 3u8,
            "ratio" => 0.75,
            "tags" => vec!["beta", "eu-west"],
            "limits" => limits,
            "payload" => b"\x01\x02\x03".as_slice(),
            "peer" => Value::display(&std::net::Ipv4Addr::LOCALHOST),
        }),
    );

    #[cfg(feature = "log")]
    {
        use opentelemetry_stdout_logs::{LogBridge, LogEmitter};

        let bridge = LogBridge::new(LogEmitter::new(ServiceIdentity::from_env()));
        log::set_boxed_logger(Box::new(bridge))?;
        log::set_max_level(log::LevelFilter::Debug);
        log::error!(target: "basic", "bridged through the log crate");
    }

    Ok(())
}
