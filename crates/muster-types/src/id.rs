//! Identifier types for Muster.
//!
//! All identifiers are UUID-based so that containers and receiver
//! registrations can be compared and hashed without holding references
//! to the objects they name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an HQ container.
///
/// Every [`Hq`] instance gets a fresh `HqId` at construction. The id is
/// what scoped signal registrations are keyed by, so two containers
/// never observe each other's receivers.
///
/// `HqId` is also the identity used for "is this the current HQ?"
/// comparisons: two handles to the same container share one id.
///
/// # Example
///
/// ```
/// use muster_types::HqId;
///
/// let a = HqId::new();
/// let b = HqId::new();
///
/// assert_ne!(a, b); // each container is unique
/// println!("container: {}", a);
/// ```
///
/// [`Hq`]: https://docs.rs/muster-runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HqId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - an HqId
// that is not bound to a live container would silently scope receivers to nothing.
impl HqId {
    /// Creates a new [`HqId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for HqId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hq:{}", self.0)
    }
}

/// Identifier for one signal receiver registration.
///
/// [`connect`] returns a `ReceiverId` for every registration it makes.
/// Connecting the same callable twice yields two distinct ids and the
/// callable will be invoked twice per send; disconnecting one id removes
/// exactly that registration.
///
/// Rust closures have no identity of their own, so the id token is the
/// disconnection handle.
///
/// # Example
///
/// ```
/// use muster_types::ReceiverId;
///
/// let r1 = ReceiverId::new();
/// let r2 = ReceiverId::new();
/// assert_ne!(r1, r2);
/// ```
///
/// [`connect`]: https://docs.rs/muster-runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiverId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - ids are
// generated by connect(), direct construction should be explicit.
impl ReceiverId {
    /// Creates a new [`ReceiverId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "recv:{}", self.0)
    }
}
