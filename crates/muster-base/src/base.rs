//! The [`Base`] trait.

use crate::wiring::Wiring;
use std::any::Any;
use std::sync::Arc;

/// A pluggable component owned by one HQ container.
///
/// Implementations are constructed by the container during dependency
/// resolution (see `BaseSpec` in `muster-runtime`) and are shared as
/// `Arc<dyn Base>` through the container's registry.
///
/// # Contract
///
/// - [`on_init`](Self::on_init) runs exactly once, immediately after
///   construction. Dependencies may not be constructed yet — cyclic
///   graphs guarantee at least one member of every cycle initializes
///   before its dependency exists. Defer dependency lookups to signal
///   handlers and runtime calls.
/// - [`wiring`](Self::wiring) is read once, right after `on_init`; the
///   returned receivers are connected scoped to the owning container
///   and the contributions are registered into its mountpoint registry.
/// - A base is never shared across containers and is dropped when its
///   container is dropped.
pub trait Base: Send + Sync + 'static {
    /// Upcasts for typed registry lookups (`Hq::get::<T>()`).
    ///
    /// Implement as `self` — the method exists because trait objects
    /// cannot be downcast without it:
    ///
    /// ```ignore
    /// fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
    ///     self
    /// }
    /// ```
    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// One-time initialization hook.
    ///
    /// Runs immediately after construction, before this base's
    /// dependencies are necessarily loaded.
    fn on_init(&self) {}

    /// Declarative signal receivers and mountpoint contributions.
    ///
    /// Walked once at construction time by the owning container.
    fn wiring(self: Arc<Self>) -> Wiring {
        Wiring::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Base for Plain {
        fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    #[test]
    fn default_wiring_is_empty() {
        let base = Arc::new(Plain);
        let wiring = Arc::clone(&base).wiring();
        assert!(wiring.receivers().is_empty());
        assert!(wiring.mounts().is_empty());
    }

    #[test]
    fn as_any_downcasts_back() {
        let base: Arc<dyn Base> = Arc::new(Plain);
        let any = base.as_any();
        assert!(any.downcast::<Plain>().is_ok());
    }
}
