//! Bridge from the [`log`] crate.
//!
//! [`LogBridge`] implements [`log::Log`] on top of a [`LogEmitter`], so
//! `log::info!` and friends end up as OTLP/JSON lines. Records are correlated
//! with the span active in [`Context::current`].
//!
//! ```no_run
//! use opentelemetry_stdout_logs::{LogBridge, LogEmitter, ServiceIdentity};
//!
//! let bridge = LogBridge::new(LogEmitter::new(ServiceIdentity::from_env()))
//!     .with_max_level(log::LevelFilter::Info);
//! log::set_boxed_logger(Box::new(bridge)).unwrap();
//! log::set_max_level(log::LevelFilter::Info);
//!
//! log::info!(target: "checkout", "order placed");
//! ```
use std::io::{Stdout, Write};

use log::{Level, LevelFilter, Metadata, Record};
use opentelemetry::Context;

use crate::emitter::LogEmitter;
use crate::severity::Severity;
use crate::value::{Attributes, Value};

const LOG_TARGET: &str = "log.target";
const CODE_NAMESPACE: &str = "code.namespace";
const CODE_FILEPATH: &str = "code.filepath";
const CODE_LINENO: &str = "code.lineno";

/// A [`log::Log`] implementation writing through a [`LogEmitter`].
#[derive(Debug)]
pub struct LogBridge<W: Write = Stdout> {
    emitter: LogEmitter<W>,
    max_level: LevelFilter,
}

impl<W: Write> LogBridge<W> {
    /// Wrap an emitter. Records of every level are emitted.
    pub fn new(emitter: LogEmitter<W>) -> Self {
        LogBridge {
            emitter,
            max_level: LevelFilter::Trace,
        }
    }

    /// Only emit records at `max_level` or more severe.
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// The wrapped emitter.
    pub fn emitter(&self) -> &LogEmitter<W> {
        &self.emitter
    }

    /// Consume the bridge and return the wrapped emitter.
    pub fn into_inner(self) -> LogEmitter<W> {
        self.emitter
    }
}

impl<W> log::Log for LogBridge<W>
where
    W: Write + Send,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.emitter.emit(
                &Context::current(),
                map_severity_to_otel_severity(record.level()),
                record.args().to_string(),
                Some(record_attributes(record)),
            );
        }
    }

    // Every record is flushed as it is written.
    fn flush(&self) {}
}

fn record_attributes(record: &Record<'_>) -> Attributes {
    let mut attributes = Attributes::with_capacity(4);
    attributes.insert(LOG_TARGET.to_owned(), Value::from(record.target()));
    if let Some(module_path) = record.module_path() {
        attributes.insert(CODE_NAMESPACE.to_owned(), Value::from(module_path));
    }
    if let Some(file) = record.file() {
        attributes.insert(CODE_FILEPATH.to_owned(), Value::from(file));
    }
    if let Some(line) = record.line() {
        attributes.insert(CODE_LINENO.to_owned(), Value::from(line));
    }
    attributes
}

fn map_severity_to_otel_severity(level: Level) -> Severity {
    match level {
        Level::Error => Severity::Error,
        Level::Warn => Severity::Warn,
        Level::Info => Severity::Info,
        Level::Debug | Level::Trace => Severity::Debug,
    }
}
