//! Process-wide emitter.
//!
//! For applications that would rather not pass a [`LogEmitter`] around,
//! [`init`] installs one writing to stdout and the free functions in this
//! module log through it.
//!
//! ```no_run
//! use opentelemetry::Context;
//! use opentelemetry_stdout_logs::{attributes, global};
//!
//! global::init("svc", "1.0").expect("called once at startup");
//! global::info(&Context::current(), "hello", Some(attributes! { "count" => 3 }));
//! ```
//!
//! Logging before [`init`] is allowed. Such records carry the
//! `unknown_service` identity and do not prevent a later [`init`].
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::correlation::CorrelationProvider;
use crate::emitter::LogEmitter;
use crate::error::{Error, Result};
use crate::internal_logging::otel_debug;
use crate::resource::ServiceIdentity;
use crate::value::Attributes;

static GLOBAL_EMITTER: OnceLock<LogEmitter> = OnceLock::new();

/// Install the global emitter with the given service identity.
///
/// Only the first call succeeds; later calls return
/// [`Error::AlreadyInitialized`] and leave the installed identity untouched.
pub fn init(
    service_name: impl Into<Cow<'static, str>>,
    service_version: impl Into<Cow<'static, str>>,
) -> Result<()> {
    init_with_identity(ServiceIdentity::new(service_name, service_version))
}

/// Install the global emitter with a prepared identity, e.g.
/// [`ServiceIdentity::from_env`].
pub fn init_with_identity(identity: ServiceIdentity) -> Result<()> {
    GLOBAL_EMITTER
        .set(LogEmitter::new(identity))
        .map_err(|rejected| {
            otel_debug!(
                name: "GlobalEmitter.Init.AlreadyInitialized",
                rejected_service_name = rejected.identity().service_name().to_owned()
            );
            Error::AlreadyInitialized
        })
}

/// The installed emitter, or a fallback with the default identity.
pub fn emitter() -> &'static LogEmitter {
    match GLOBAL_EMITTER.get() {
        Some(emitter) => emitter,
        None => {
            otel_debug!(name: "GlobalEmitter.NotInitialized");
            fallback_emitter()
        }
    }
}

fn fallback_emitter() -> &'static LogEmitter {
    static FALLBACK_EMITTER: OnceLock<LogEmitter> = OnceLock::new();
    FALLBACK_EMITTER.get_or_init(|| LogEmitter::new(ServiceIdentity::default()))
}

/// Emit a DEBUG record through the global emitter.
pub fn debug(
    cx: &impl CorrelationProvider,
    body: impl Into<String>,
    attributes: Option<Attributes>,
) {
    emitter().debug(cx, body, attributes)
}

/// Emit an INFO record through the global emitter.
pub fn info(
    cx: &impl CorrelationProvider,
    body: impl Into<String>,
    attributes: Option<Attributes>,
) {
    emitter().info(cx, body, attributes)
}

/// Emit a WARN record through the global emitter.
pub fn warn(
    cx: &impl CorrelationProvider,
    body: impl Into<String>,
    attributes: Option<Attributes>,
) {
    emitter().warn(cx, body, attributes)
}

/// Emit an ERROR record through the global emitter.
pub fn error(
    cx: &impl CorrelationProvider,
    body: impl Into<String>,
    attributes: Option<Attributes>,
) {
    emitter().error(cx, body, attributes)
}
