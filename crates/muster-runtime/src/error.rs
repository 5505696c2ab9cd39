//! Container-level errors.
//!
//! # Error Code Convention
//!
//! Runtime errors use the `HQ_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`UnknownBase`](LoadError::UnknownBase) | `HQ_UNKNOWN_BASE` | No |
//! | [`Build`](LoadError::Build) | `HQ_BUILD` | follows source |
//!
//! Lookup misses (`Hq::current()`, `Hq::base()`, `Hq::get()`) are not
//! errors; they surface as `Option` at the call site.

use muster_base::BaseError;
use muster_types::ErrorCode;
use thiserror::Error;

/// Failure during dependency loading.
///
/// Loading is all-or-nothing per call: the first failing name aborts
/// `load_dependencies` and no further names are attempted. Bases already
/// inserted by the failing call stay in the container.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The resolver knows no base under this name.
    ///
    /// **Not recoverable** - the name is wrong or the base was never
    /// registered with the resolver.
    #[error("unknown base '{0}'")]
    UnknownBase(String),

    /// A resolved base failed to construct.
    #[error("base '{base}' failed to build: {source}")]
    Build {
        base: String,
        #[source]
        source: BaseError,
    },
}

impl ErrorCode for LoadError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownBase(_) => "HQ_UNKNOWN_BASE",
            Self::Build { .. } => "HQ_BUILD",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::UnknownBase(_) => false,
            Self::Build { source, .. } => source.is_recoverable(),
        }
    }
}
