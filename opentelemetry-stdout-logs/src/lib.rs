//! Emit OpenTelemetry log records to stdout as newline-delimited OTLP/JSON.
//!
//! Each call writes one complete `LogsData` document on its own line. The
//! document holds the service's resource, this crate's instrumentation
//! scope, and a single log record. Attributes of any supported shape are
//! encoded as OTLP `AnyValue`s, and the record is correlated with the active
//! span when there is one.
//!
//! There is no batching, exporter pipeline or network transport: emission is
//! synchronous, and a record that cannot be written is dropped without
//! disturbing the caller.
//!
//! # Examples
//!
//! ```no_run
//! use opentelemetry::Context;
//! use opentelemetry_stdout_logs::{attributes, LogEmitter, ServiceIdentity, Value};
//!
//! let emitter = LogEmitter::new(ServiceIdentity::new("svc", "1.0"));
//! let cx = Context::current();
//!
//! emitter.info(&cx, "hello", Some(attributes! { "count" => 3, "ok" => true }));
//! emitter.error(&cx, "request failed", Some(attributes! {
//!     "http.status_code" => 503,
//!     "retry.delays_ms" => vec![100, 200, 400],
//!     "peer" => Value::display(&std::net::Ipv4Addr::LOCALHOST),
//! }));
//!
//! // {"resourceLogs":[{"resource":{"attributes":[{"key":"service.name","value":{"str..
//! ```
#![warn(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod internal_logging;

mod correlation;
mod emitter;
mod error;
mod resource;
mod severity;
mod value;

pub mod global;
pub mod proto;

#[cfg(feature = "log")]
mod bridge;
#[cfg_attr(docsrs, doc(cfg(feature = "log")))]
#[cfg(feature = "log")]
pub use bridge::LogBridge;

pub use correlation::{CorrelationProvider, NoCorrelation, TraceCorrelation};
pub use emitter::{LogEmitter, LogEmitterBuilder};
pub use error::{Error, Result};
pub use resource::ServiceIdentity;
pub use severity::Severity;
pub use value::{encode, Attributes, Value};
