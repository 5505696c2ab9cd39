//! Signal layer errors.
//!
//! # Error Code Convention
//!
//! All signal errors use the `SIGNAL_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`Schema`](SignalError::Schema) | `SIGNAL_SCHEMA` | No |
//! | [`NoRuntime`](SignalError::NoRuntime) | `SIGNAL_NO_RUNTIME` | No |
//!
//! Schema errors are fatal per-send: they surface synchronously from the
//! dynamic send path *before* any receiver is scheduled, so no partial
//! dispatch occurs. Receiver failures are not errors at this boundary;
//! they are isolated and logged by the dispatch hub.

use muster_types::ErrorCode;
use thiserror::Error;

/// Signal layer error.
///
/// # Example
///
/// ```
/// use muster_signal::SignalError;
/// use muster_types::ErrorCode;
///
/// let err = SignalError::Schema("missing field `name`".into());
/// assert_eq!(err.code(), "SIGNAL_SCHEMA");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, Error)]
pub enum SignalError {
    /// The given fields do not match the Message schema.
    ///
    /// Raised by the dynamic send path when the payload has unknown
    /// fields, missing required fields, or mistyped values. No receiver
    /// is scheduled when this error is returned.
    #[error("message schema mismatch: {0}")]
    Schema(String),

    /// No async runtime is available to schedule receiver invocations.
    ///
    /// `send` spawns one task per receiver; it must be called from
    /// within a tokio runtime.
    #[error("no async runtime available for signal dispatch")]
    NoRuntime,
}

impl ErrorCode for SignalError {
    fn code(&self) -> &'static str {
        match self {
            Self::Schema(_) => "SIGNAL_SCHEMA",
            Self::NoRuntime => "SIGNAL_NO_RUNTIME",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            // Identical input will fail identically.
            Self::Schema(_) => false,
            Self::NoRuntime => false,
        }
    }
}
