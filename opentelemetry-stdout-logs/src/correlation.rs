//! Trace correlation for emitted records.
//!
//! The emitter does not track spans itself. It asks a [`CorrelationProvider`]
//! for the active trace, which is normally an [`opentelemetry::Context`].
use opentelemetry::trace::{SpanContext, TraceContextExt};
use opentelemetry::Context;

/// Identifiers linking a log record to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceCorrelation {
    /// The 16-byte trace id.
    pub trace_id: [u8; 16],
    /// The 8-byte span id.
    pub span_id: [u8; 8],
    /// W3C trace flags.
    pub flags: u8,
}

impl TraceCorrelation {
    /// Create a correlation from raw identifiers.
    pub const fn new(trace_id: [u8; 16], span_id: [u8; 8], flags: u8) -> Self {
        TraceCorrelation {
            trace_id,
            span_id,
            flags,
        }
    }

    /// Both identifiers are non-zero, matching [`SpanContext::is_valid`].
    pub fn is_valid(&self) -> bool {
        self.trace_id != [0; 16] && self.span_id != [0; 8]
    }
}

/// Source of the trace a log record is correlated with.
pub trait CorrelationProvider {
    /// Returns the active trace, or `None` when there is no valid one.
    fn valid_trace_context(&self) -> Option<TraceCorrelation>;
}

/// A provider that never correlates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoCorrelation;

impl CorrelationProvider for NoCorrelation {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        None
    }
}

impl CorrelationProvider for TraceCorrelation {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        self.is_valid().then_some(*self)
    }
}

impl CorrelationProvider for SpanContext {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        if !self.is_valid() {
            return None;
        }
        Some(TraceCorrelation {
            trace_id: self.trace_id().to_bytes(),
            span_id: self.span_id().to_bytes(),
            flags: self.trace_flags().to_u8(),
        })
    }
}

impl CorrelationProvider for Context {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        self.span().span_context().valid_trace_context()
    }
}

impl<P: CorrelationProvider> CorrelationProvider for Option<P> {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        self.as_ref().and_then(P::valid_trace_context)
    }
}

impl<P: CorrelationProvider + ?Sized> CorrelationProvider for &P {
    fn valid_trace_context(&self) -> Option<TraceCorrelation> {
        (**self).valid_trace_context()
    }
}
