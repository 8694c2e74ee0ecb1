use thiserror::Error;

/// Describe the result of fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Errors produced while emitting or configuring.
///
/// The leveled emission methods never return these; they are only visible
/// through [`LogEmitter::try_emit`](crate::LogEmitter::try_emit) and
/// [`global::init`](crate::global::init).
pub enum Error {
    /// The log record could not be encoded as JSON.
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The encoded line could not be written to the sink.
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),

    /// The global emitter was already installed.
    #[error("global log emitter is already initialized")]
    AlreadyInitialized,
}
