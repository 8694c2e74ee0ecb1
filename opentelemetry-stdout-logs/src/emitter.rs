//! # Log Emitter
//!
//! [`LogEmitter`] assembles one OTLP `LogsData` document per call and writes
//! it as a single JSON line to its configured [`Write`] instance. By default
//! it will write to [`Stdout`].
//!
//! Emission is synchronous and unbuffered. Each line is written with one
//! `write_all` while the sink is locked, so lines from concurrent callers
//! never interleave.
//!
//! [`Write`]: std::io::Write
//! [`Stdout`]: std::io::Stdout
use std::borrow::Cow;
use std::fmt;
use std::io::{stdout, Stdout, Write};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::correlation::CorrelationProvider;
use crate::error::Result;
use crate::internal_logging::otel_warn;
use crate::proto::common::v1::AnyValue;
use crate::proto::logs::v1::{LogRecord, LogsData, ResourceLogs, ScopeLogs};
use crate::resource::{instrumentation_scope, ServiceIdentity};
use crate::severity::Severity;
use crate::value::{encode_attributes, Attributes};

/// Emitter builder
#[derive(Debug)]
pub struct LogEmitterBuilder<W: Write> {
    identity: ServiceIdentity,
    writer: W,
}

impl Default for LogEmitterBuilder<Stdout> {
    /// Return the default builder, writing to stdout with an
    /// `unknown_service` identity.
    fn default() -> Self {
        Self {
            identity: ServiceIdentity::default(),
            writer: stdout(),
        }
    }
}

impl<W: Write> LogEmitterBuilder<W> {
    /// Specify the `service.name` resource attribute.
    pub fn with_service_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        let version = self.identity.service_version().to_owned();
        self.identity = ServiceIdentity::new(name, version);
        self
    }

    /// Specify the `service.version` resource attribute.
    pub fn with_service_version(mut self, version: impl Into<Cow<'static, str>>) -> Self {
        let name = self.identity.service_name().to_owned();
        self.identity = ServiceIdentity::new(name, version);
        self
    }

    /// Replace the whole service identity.
    pub fn with_identity(mut self, identity: ServiceIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Specify the writer to use.
    pub fn with_writer<T: Write>(self, writer: T) -> LogEmitterBuilder<T> {
        LogEmitterBuilder {
            identity: self.identity,
            writer,
        }
    }

    /// Build the emitter.
    pub fn build(self) -> LogEmitter<W> {
        LogEmitter {
            identity: self.identity,
            writer: Mutex::new(self.writer),
        }
    }
}

/// Writes OpenTelemetry log records as newline-delimited OTLP/JSON.
///
/// ```no_run
/// use opentelemetry::Context;
/// use opentelemetry_stdout_logs::{attributes, LogEmitter, ServiceIdentity};
///
/// let emitter = LogEmitter::new(ServiceIdentity::new("checkout", "1.4.2"));
/// emitter.info(&Context::current(), "order placed", Some(attributes! { "items" => 3 }));
/// emitter.warn(&Context::current(), "stock low", None);
/// ```
pub struct LogEmitter<W: Write = Stdout> {
    identity: ServiceIdentity,
    writer: Mutex<W>,
}

impl LogEmitter<Stdout> {
    /// Create an emitter writing to stdout.
    pub fn new(identity: ServiceIdentity) -> Self {
        LogEmitter::builder().with_identity(identity).build()
    }

    /// Create a builder, see [`LogEmitterBuilder`].
    pub fn builder() -> LogEmitterBuilder<Stdout> {
        LogEmitterBuilder::default()
    }
}

impl<W: Write> fmt::Debug for LogEmitter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEmitter")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<W: Write> LogEmitter<W> {
    /// The identity reported in every record's resource.
    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Emit a record at [`Severity::Debug`].
    pub fn debug(
        &self,
        cx: &impl CorrelationProvider,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) {
        self.emit(cx, Severity::Debug, body, attributes)
    }

    /// Emit a record at [`Severity::Info`].
    pub fn info(
        &self,
        cx: &impl CorrelationProvider,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) {
        self.emit(cx, Severity::Info, body, attributes)
    }

    /// Emit a record at [`Severity::Warn`].
    pub fn warn(
        &self,
        cx: &impl CorrelationProvider,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) {
        self.emit(cx, Severity::Warn, body, attributes)
    }

    /// Emit a record at [`Severity::Error`].
    pub fn error(
        &self,
        cx: &impl CorrelationProvider,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) {
        self.emit(cx, Severity::Error, body, attributes)
    }

    /// Emit a record, discarding any failure.
    ///
    /// Logging must not be able to fail the application, so a record that
    /// cannot be serialized or written is dropped. The failure is reported
    /// through the crate's internal diagnostics only.
    pub fn emit(
        &self,
        cx: &impl CorrelationProvider,
        severity: Severity,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) {
        if let Err(err) = self.try_emit(cx, severity, body, attributes) {
            otel_warn!(
                name: "LogEmitter.Emit.RecordDropped",
                severity = severity.name(),
                error = format!("{err}")
            );
        }
    }

    /// Emit a record, returning serialization and write errors.
    pub fn try_emit(
        &self,
        cx: &impl CorrelationProvider,
        severity: Severity,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> Result<()> {
        let data = self.build_logs_data(cx, severity, body, attributes);
        let mut line = serde_json::to_vec(&data)?;
        line.push(b'\n');
        self.write_line(&line)
    }

    /// Assemble the `LogsData` document for one record without writing it.
    pub fn build_logs_data(
        &self,
        cx: &impl CorrelationProvider,
        severity: Severity,
        body: impl Into<String>,
        attributes: Option<Attributes>,
    ) -> LogsData {
        let record = build_record(cx, severity, body.into(), attributes);

        LogsData {
            resource_logs: vec![ResourceLogs {
                resource: Some(self.identity.resource()),
                scope_logs: vec![ScopeLogs {
                    scope: Some(instrumentation_scope()),
                    log_records: vec![record],
                }],
            }],
        }
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_line(&self, line: &[u8]) -> Result<()> {
        // The line goes out in a single `write_all` while the lock is held, so
        // lines from other threads cannot be interleaved with it.
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line)?;
        writer.flush()?;
        Ok(())
    }
}

fn build_record(
    cx: &impl CorrelationProvider,
    severity: Severity,
    body: String,
    attributes: Option<Attributes>,
) -> LogRecord {
    let now = to_nanos(SystemTime::now());
    let correlation = cx.valid_trace_context();

    LogRecord {
        time_unix_nano: now,
        observed_time_unix_nano: now,
        severity_number: severity.number(),
        severity_text: severity.name().to_owned(),
        body: Some(AnyValue::String(body)),
        attributes: encode_attributes(attributes),
        trace_id: correlation.map(|c| c.trace_id),
        span_id: correlation.map(|c| c.span_id),
        flags: correlation
            .map(|c| u32::from(c.flags))
            .filter(|&flags| flags != 0),
    }
}

pub(crate) fn to_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| Duration::from_secs(0))
        .as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::{NoCorrelation, TraceCorrelation};
    use crate::proto::common::v1::KeyValue;
    use crate::{attributes, Value};
    use std::io;

    fn emitter() -> LogEmitter<Vec<u8>> {
        LogEmitter::builder()
            .with_service_name("svc")
            .with_service_version("1.0")
            .with_writer(Vec::new())
            .build()
    }

    fn record(data: &LogsData) -> &LogRecord {
        &data.resource_logs[0].scope_logs[0].log_records[0]
    }

    #[test]
    fn builder_sets_identity() {
        let emitter = emitter();
        assert_eq!(emitter.identity(), &ServiceIdentity::new("svc", "1.0"));

        let emitter = LogEmitter::builder()
            .with_service_version("2.0")
            .with_service_name("other")
            .with_writer(io::sink())
            .build();
        assert_eq!(emitter.identity(), &ServiceIdentity::new("other", "2.0"));
    }

    #[test]
    fn record_fields() {
        let data = emitter().build_logs_data(
            &NoCorrelation,
            Severity::Warn,
            "disk almost full",
            Some(attributes! { "free" => 12u8 }),
        );

        let record = record(&data);
        assert_ne!(record.time_unix_nano, 0);
        assert_eq!(record.time_unix_nano, record.observed_time_unix_nano);
        assert_eq!(record.severity_number, 13);
        assert_eq!(record.severity_text, "WARN");
        assert_eq!(
            record.body,
            Some(AnyValue::String("disk almost full".into()))
        );
        assert_eq!(
            record.attributes,
            vec![KeyValue {
                key: "free".into(),
                value: AnyValue::Int(12)
            }]
        );
        assert_eq!(record.trace_id, None);
        assert_eq!(record.span_id, None);
        assert_eq!(record.flags, None);
    }

    #[test]
    fn envelope_has_one_resource_scope_and_record() {
        let data = emitter().build_logs_data(&NoCorrelation, Severity::Info, "hi", None);

        assert_eq!(data.resource_logs.len(), 1);
        let resource_logs = &data.resource_logs[0];
        assert_eq!(resource_logs.resource.as_ref().unwrap().attributes.len(), 5);
        assert_eq!(resource_logs.scope_logs.len(), 1);
        let scope_logs = &resource_logs.scope_logs[0];
        assert_eq!(
            scope_logs.scope.as_ref().unwrap().name,
            "opentelemetry-stdout-logs"
        );
        assert_eq!(scope_logs.log_records.len(), 1);
        assert!(scope_logs.log_records[0].attributes.is_empty());
    }

    #[test]
    fn correlation_is_copied() {
        let correlation = TraceCorrelation::new([7; 16], [9; 8], 1);
        let data = emitter().build_logs_data(&correlation, Severity::Error, "boom", None);

        let record = record(&data);
        assert_eq!(record.trace_id, Some([7; 16]));
        assert_eq!(record.span_id, Some([9; 8]));
        assert_eq!(record.flags, Some(1));
    }

    #[test]
    fn zero_flags_are_left_unset() {
        let correlation = TraceCorrelation::new([1; 16], [1; 8], 0);
        let data = emitter().build_logs_data(&correlation, Severity::Info, "unsampled", None);

        let record = record(&data);
        assert_eq!(record.trace_id, Some([1; 16]));
        assert_eq!(record.span_id, Some([1; 8]));
        assert_eq!(record.flags, None);
    }

    #[test]
    fn leveled_methods_write_one_line_each() {
        let emitter = emitter();
        emitter.debug(&NoCorrelation, "d", None);
        emitter.info(&NoCorrelation, "i", None);
        emitter.warn(&NoCorrelation, "w", None);
        emitter.error(&NoCorrelation, "e", Some(attributes! { "k" => Value::from("v") }));

        let output = String::from_utf8(emitter.into_inner()).unwrap();
        let levels: Vec<String> = output
            .lines()
            .map(|line| {
                let json: serde_json::Value = serde_json::from_str(line).unwrap();
                json["resourceLogs"][0]["scopeLogs"][0]["logRecords"][0]["severityText"]
                    .as_str()
                    .unwrap()
                    .to_owned()
            })
            .collect();
        assert_eq!(levels, ["DEBUG", "INFO", "WARN", "ERROR"]);
        assert!(output.ends_with('\n'));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_swallowed() {
        let emitter = LogEmitter::builder().with_writer(FailingWriter).build();

        assert!(matches!(
            emitter.try_emit(&NoCorrelation, Severity::Info, "lost", None),
            Err(crate::Error::Io(_))
        ));
        // Must not panic or surface the error.
        emitter.info(&NoCorrelation, "lost", None);
    }

    #[test]
    fn nanos_before_epoch_clamp_to_zero() {
        assert_eq!(to_nanos(UNIX_EPOCH - Duration::from_secs(1)), 0);
        assert_eq!(to_nanos(UNIX_EPOCH + Duration::from_nanos(42)), 42);
    }
}
