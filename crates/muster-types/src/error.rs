//! Unified error interface for Muster.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so that
//! callers, logs, and tests see one consistent error surface:
//!
//! - **Machine-readable codes** for programmatic handling
//! - **Recoverability info** for retry logic
//!
//! Per-crate prefixes: `SIGNAL_`, `MOUNT_`, `BASE_`, `HQ_`.
//!
//! # Example
//!
//! ```
//! use muster_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum MyError {
//!     NotFound(String),
//!     Busy,
//! }
//!
//! impl ErrorCode for MyError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "MY_NOT_FOUND",
//!             Self::Busy => "MY_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! let err = MyError::Busy;
//! assert_eq!(err.code(), "MY_BUSY");
//! assert!(err.is_recoverable());
//! ```

/// Unified error code interface for Muster errors.
///
/// # Code Format
///
/// Error codes are:
///
/// - **UPPER_SNAKE_CASE**: e.g., `"HQ_UNKNOWN_BASE"`
/// - **Prefixed by layer**: `"SIGNAL_"`, `"MOUNT_"`, `"BASE_"`, `"HQ_"`
/// - **Stable**: codes do not change once defined (API contract)
///
/// # Recoverability
///
/// An error is recoverable when retrying the operation may succeed or the
/// caller can take corrective action. Resolution misses and schema
/// mismatches are not recoverable: retrying an identical call cannot
/// help.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the error is recoverable.
    ///
    /// - `true`: retry may succeed, or the caller can correct the input
    /// - `false`: retry will not help, requires a code/config change
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows Muster conventions.
///
/// # Checks
///
/// 1. Code is UPPER_SNAKE_CASE
/// 2. Code starts with the expected prefix
/// 3. Code is not empty
///
/// # Panics
///
/// Panics with a descriptive message if validation fails.
///
/// # Example
///
/// ```
/// use muster_types::{assert_error_code, ErrorCode};
///
/// #[derive(Debug)]
/// enum MyError { Busy }
///
/// impl ErrorCode for MyError {
///     fn code(&self) -> &'static str { "MY_BUSY" }
///     fn is_recoverable(&self) -> bool { true }
/// }
///
/// assert_error_code(&MyError::Busy, "MY_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");

    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );

    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates multiple error codes at once.
///
/// Use this to verify all variants of an error enum in one test.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

/// Checks if a string is UPPER_SNAKE_CASE.
fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }

    if s.starts_with('_') || s.ends_with('_') {
        return false;
    }

    if s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
