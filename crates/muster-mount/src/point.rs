//! The [`Mountpoint`] trait and contribution wrappers.

use std::any::{Any, TypeId};
use std::sync::Arc;

/// A named extension point.
///
/// The implementing type is the extension point's identity: registries
/// key contribution sets by it. Like signals, the type itself is never
/// instantiated; it carries the argument schema contributed callables
/// accept.
///
/// # Example
///
/// ```
/// use muster_mount::Mountpoint;
///
/// struct Validators;
///
/// impl Mountpoint for Validators {
///     const NAME: &'static str = "validators";
///     type Args = String;
/// }
///
/// assert_eq!(Validators::NAME, "validators");
/// ```
pub trait Mountpoint: 'static {
    /// Human-readable extension point name, used in logs.
    const NAME: &'static str;

    /// Argument type passed to every contributed callable.
    type Args: Send + Sync + 'static;
}

/// A callable contributed to a mountpoint.
///
/// Cloning shares the underlying callable.
pub struct Contribution<P: Mountpoint> {
    f: Arc<dyn Fn(&P::Args) + Send + Sync>,
}

impl<P: Mountpoint> Clone for Contribution<P> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<P: Mountpoint> Contribution<P> {
    /// Wraps a callable for mountpoint `P`.
    pub fn new(f: impl Fn(&P::Args) + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    /// Invokes the contributed callable.
    pub fn call(&self, args: &P::Args) {
        (self.f)(args);
    }
}

/// A type-erased contribution, as stored in registries and base wiring.
///
/// Typed access comes back via [`downcast`](AnyContribution::downcast);
/// the registry keys entries by the mountpoint's `TypeId`, so the
/// downcast only fails if an entry was filed under the wrong key.
#[derive(Clone)]
pub struct AnyContribution {
    point: TypeId,
    point_name: &'static str,
    inner: Arc<dyn Any + Send + Sync>,
}

impl AnyContribution {
    /// Erases a typed contribution for mountpoint `P`.
    pub fn new<P: Mountpoint>(contribution: Contribution<P>) -> Self {
        Self {
            point: TypeId::of::<P>(),
            point_name: P::NAME,
            inner: Arc::new(contribution),
        }
    }

    /// The `TypeId` of the mountpoint this contribution targets.
    #[must_use]
    pub fn point_type(&self) -> TypeId {
        self.point
    }

    /// The name of the mountpoint this contribution targets.
    #[must_use]
    pub fn point_name(&self) -> &'static str {
        self.point_name
    }

    /// Recovers the typed contribution, if `P` matches.
    #[must_use]
    pub fn downcast<P: Mountpoint>(&self) -> Option<Contribution<P>> {
        self.inner.downcast_ref::<Contribution<P>>().cloned()
    }
}

impl std::fmt::Debug for AnyContribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyContribution")
            .field("point", &self.point_name)
            .finish_non_exhaustive()
    }
}
