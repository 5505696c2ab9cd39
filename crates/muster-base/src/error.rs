//! Base layer errors.
//!
//! # Error Code Convention
//!
//! All base errors use the `BASE_` prefix:
//!
//! | Error | Code | Recoverable |
//! |-------|------|-------------|
//! | [`Init`](BaseError::Init) | `BASE_INIT` | Yes |
//! | [`Config`](BaseError::Config) | `BASE_CONFIG` | No |
//! | [`ContainerGone`](BaseError::ContainerGone) | `BASE_CONTAINER_GONE` | No |

use muster_types::ErrorCode;
use thiserror::Error;

/// Base layer error.
///
/// Construction failures surface through the container's load path and
/// abort the whole load; they are never retried or skipped.
///
/// # Example
///
/// ```
/// use muster_base::BaseError;
/// use muster_types::ErrorCode;
///
/// let err = BaseError::Config("bad section".into());
/// assert_eq!(err.code(), "BASE_CONFIG");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, Error)]
pub enum BaseError {
    /// The base failed to construct or initialize.
    ///
    /// **Recoverable** - may succeed with a different configuration.
    #[error("base initialization failed: {0}")]
    Init(String),

    /// The base's configuration section could not be resolved.
    ///
    /// **Not recoverable** - fix the configuration.
    #[error("base configuration invalid: {0}")]
    Config(String),

    /// The owning container has been dropped.
    ///
    /// Bases hold only a weak handle to their HQ; this is returned when
    /// a base outlives its container and still tries to use it.
    ///
    /// **Not recoverable** - the container is gone.
    #[error("owning container no longer exists")]
    ContainerGone,
}

impl ErrorCode for BaseError {
    fn code(&self) -> &'static str {
        match self {
            Self::Init(_) => "BASE_INIT",
            Self::Config(_) => "BASE_CONFIG",
            Self::ContainerGone => "BASE_CONTAINER_GONE",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Init(_) => true,
            Self::Config(_) => false,
            Self::ContainerGone => false,
        }
    }
}
