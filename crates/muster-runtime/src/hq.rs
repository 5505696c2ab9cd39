//! The HQ container.

use crate::config::MusterConfig;
use crate::context::BaseContext;
use crate::current::{self, CurrentGuard};
use crate::error::LoadError;
use crate::hub;
use crate::resolver::{BaseResolver, StaticBaseResolver};
use muster_base::Base;
use muster_mount::MountpointRegistry;
use muster_signal::Signal;
use muster_types::{HqId, ReceiverId, SignalScope};
use parking_lot::RwLock;
use std::any::TypeId;
use std::sync::Arc;

pub(crate) struct HqInner {
    id: HqId,
    config: MusterConfig,
    resolver: Arc<dyn BaseResolver>,
    bases: RwLock<Vec<BaseEntry>>,
    mounts: MountpointRegistry,
}

struct BaseEntry {
    name: String,
    base: Arc<dyn Base>,
    // Connections made by this base's wiring, for later disconnection.
    receivers: Vec<(TypeId, ReceiverId)>,
}

impl Drop for HqInner {
    fn drop(&mut self) {
        hub::drop_scope(self.id);
        tracing::debug!(hq = %self.id, "container dropped");
    }
}

/// An application container: an ordered registry of bases, a signal
/// scope, and a mountpoint registry.
///
/// `Hq` is a cheap-clone handle; clones share one container. Equality
/// is container identity, so `current() == Some(hq)` reads as "is this
/// the current container".
///
/// # Example
///
/// ```
/// use muster_base::Base;
/// use muster_runtime::{BaseSpec, Hq, StaticBaseResolver};
/// use std::any::Any;
/// use std::sync::Arc;
///
/// struct Alpha;
/// struct Gamma;
///
/// impl Base for Alpha {
///     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
///         self
///     }
/// }
///
/// impl Base for Gamma {
///     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
///         self
///     }
/// }
///
/// // A two-node cycle: alpha needs gamma, gamma needs alpha.
/// let resolver = StaticBaseResolver::new()
///     .with(BaseSpec {
///         name: "alpha",
///         dependencies: &["gamma"],
///         build: |_| Ok(Arc::new(Alpha)),
///     })
///     .with(BaseSpec {
///         name: "gamma",
///         dependencies: &["alpha"],
///         build: |_| Ok(Arc::new(Gamma)),
///     });
///
/// let hq = Hq::builder().resolver(resolver).build();
/// hq.load_dependencies(&["alpha"]).unwrap();
///
/// // Discovery order, and the cycle terminated.
/// assert_eq!(hq.base_names(), ["alpha", "gamma"]);
/// assert!(hq.get::<Gamma>().is_some());
/// ```
#[derive(Clone)]
pub struct Hq {
    inner: Arc<HqInner>,
}

impl Hq {
    /// Starts building a container.
    #[must_use]
    pub fn builder() -> HqBuilder {
        HqBuilder::default()
    }

    pub(crate) fn from_inner(inner: Arc<HqInner>) -> Self {
        Self { inner }
    }

    /// This container's identity.
    #[must_use]
    pub fn id(&self) -> HqId {
        self.inner.id
    }

    /// The container-wide configuration.
    #[must_use]
    pub fn config(&self) -> &MusterConfig {
        &self.inner.config
    }

    /// The signal scope sends addressed to this container resolve to.
    #[must_use]
    pub fn scope(&self) -> SignalScope {
        SignalScope::Hq(self.inner.id)
    }

    /// Loads the named bases and, transitively, their dependencies.
    ///
    /// Depth-first and cycle-tolerant: a base is inserted into the
    /// registry **before** its dependencies are recursed into, so a
    /// dependency edge back into the in-progress set is a no-op rather
    /// than infinite recursion. The registry order that results is
    /// preorder discovery order, not dependency-ready order.
    ///
    /// For each newly constructed base, in order: `on_init` runs, its
    /// wiring is applied (receivers connected under this container's
    /// scope, contributions registered), and it is inserted. `on_init`
    /// must therefore never assume its dependencies exist yet.
    ///
    /// # Errors
    ///
    /// [`LoadError::UnknownBase`] when the resolver knows no spec for a
    /// requested name, [`LoadError::Build`] when construction fails.
    /// Either aborts the call; bases inserted before the failure stay
    /// loaded.
    pub fn load_dependencies(&self, names: &[&str]) -> Result<(), LoadError> {
        for name in names {
            self.load_one(name)?;
        }
        Ok(())
    }

    fn load_one(&self, name: &str) -> Result<(), LoadError> {
        // Present means loaded or mid-load; either way this edge is done.
        if self.base(name).is_some() {
            return Ok(());
        }

        let spec = self
            .inner
            .resolver
            .resolve(name)
            .ok_or_else(|| LoadError::UnknownBase(name.to_string()))?;

        let context = BaseContext::new(
            Arc::downgrade(&self.inner),
            spec.name,
            spec.dependencies,
            self.inner.config.clone(),
        );
        let base = (spec.build)(context).map_err(|source| LoadError::Build {
            base: name.to_string(),
            source,
        })?;

        base.on_init();

        let (receivers, contributions) = Arc::clone(&base).wiring().into_parts();
        tracing::debug!(
            base = name,
            hq = %self.inner.id,
            receivers = receivers.len(),
            contributions = contributions.len(),
            "base loaded"
        );
        let mut wired = Vec::with_capacity(receivers.len());
        for receiver in receivers {
            let signal = receiver.signal_type();
            let id = hub::connect(self.scope(), receiver);
            wired.push((signal, id));
        }
        for contribution in contributions {
            self.inner.mounts.register(contribution);
        }

        self.inner.bases.write().push(BaseEntry {
            name: name.to_string(),
            base,
            receivers: wired,
        });

        for dependency in spec.dependencies {
            self.load_one(dependency)?;
        }
        Ok(())
    }

    /// Snapshot of the loaded bases in discovery order.
    #[must_use]
    pub fn bases(&self) -> Vec<(String, Arc<dyn Base>)> {
        self.inner
            .bases
            .read()
            .iter()
            .map(|entry| (entry.name.clone(), Arc::clone(&entry.base)))
            .collect()
    }

    /// Loaded base names in discovery order.
    #[must_use]
    pub fn base_names(&self) -> Vec<String> {
        self.inner
            .bases
            .read()
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Looks up a loaded base by name.
    #[must_use]
    pub fn base(&self, name: &str) -> Option<Arc<dyn Base>> {
        self.inner
            .bases
            .read()
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| Arc::clone(&entry.base))
    }

    /// Looks up the first loaded base of concrete type `T`.
    #[must_use]
    pub fn get<T: Base>(&self) -> Option<Arc<T>> {
        self.inner
            .bases
            .read()
            .iter()
            .find_map(|entry| Arc::clone(&entry.base).as_any().downcast::<T>().ok())
    }

    /// Ids of the receivers a base's wiring connected for signal `S`.
    ///
    /// Returned in declaration order; empty when the base is not loaded
    /// or declared no receiver for `S`. These are the tokens
    /// [`disconnect_signal_receiver`](Self::disconnect_signal_receiver)
    /// accepts, so declaratively wired receivers can be severed without
    /// dropping the whole container.
    #[must_use]
    pub fn wired_receivers<S: Signal>(&self, base: &str) -> Vec<ReceiverId> {
        let signal = TypeId::of::<S>();
        self.inner
            .bases
            .read()
            .iter()
            .find(|entry| entry.name == base)
            .map(|entry| {
                entry
                    .receivers
                    .iter()
                    .filter(|(s, _)| *s == signal)
                    .map(|(_, id)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// This container's mountpoint registry.
    #[must_use]
    pub fn mountpoints(&self) -> &MountpointRegistry {
        &self.inner.mounts
    }

    /// Makes this container the ambient current HQ.
    ///
    /// The returned guard restores the previous current when dropped,
    /// on every exit path including unwind. Guards nest.
    #[must_use]
    pub fn make_current(&self) -> CurrentGuard {
        current::push(&self.inner)
    }

    /// The ambient current container, if one is set.
    #[must_use]
    pub fn current() -> Option<Hq> {
        current::current().map(Hq::from_inner)
    }

    /// Re-establishes this container as current without a guard.
    ///
    /// Replaces whatever is currently on top of the ambient stack.
    pub fn reset(&self) {
        current::reset(&self.inner);
    }

    /// Removes one receiver registration from this container's scope.
    ///
    /// Convenience for `S::disconnect(id, Some(self))`; returns `false`
    /// when the id is not registered here.
    pub fn disconnect_signal_receiver<S: Signal>(&self, id: ReceiverId) -> bool {
        hub::disconnect(self.scope(), TypeId::of::<S>(), id)
    }
}

impl PartialEq for Hq {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Hq {}

impl std::fmt::Debug for Hq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hq")
            .field("id", &self.inner.id)
            .field("bases", &self.base_names())
            .finish_non_exhaustive()
    }
}

/// Builds an [`Hq`].
pub struct HqBuilder {
    config: MusterConfig,
    resolver: Arc<dyn BaseResolver>,
}

impl Default for HqBuilder {
    fn default() -> Self {
        Self {
            config: MusterConfig::default(),
            resolver: Arc::new(StaticBaseResolver::new()),
        }
    }
}

impl HqBuilder {
    /// Sets the container-wide configuration.
    #[must_use]
    pub fn config(mut self, config: MusterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the base resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: impl BaseResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Sets a shared base resolver.
    #[must_use]
    pub fn shared_resolver(mut self, resolver: Arc<dyn BaseResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Creates the container.
    #[must_use]
    pub fn build(self) -> Hq {
        let id = HqId::new();
        tracing::debug!(hq = %id, "container created");
        Hq {
            inner: Arc::new(HqInner {
                id,
                config: self.config,
                resolver: self.resolver,
                bases: RwLock::new(Vec::new()),
                mounts: MountpointRegistry::new(),
            }),
        }
    }
}

/// Typed lookup against the ambient current container.
///
/// `None` when no current HQ is set or it holds no base of type `T`;
/// the two cases are told apart with [`Hq::current`].
#[must_use]
pub fn current_base<T: Base>() -> Option<Arc<T>> {
    Hq::current()?.get::<T>()
}
