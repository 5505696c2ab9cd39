//! Base resolution: mapping names to buildable specs.
//!
//! A [`BaseSpec`] carries the class-level declarations of one base type:
//! its name, its declared dependency names, and a build function. The
//! container resolves names to specs through a [`BaseResolver`] during
//! dependency loading; [`StaticBaseResolver`] is the plain in-memory
//! implementation used by applications and tests alike.

use crate::context::BaseContext;
use muster_base::{Base, BaseError};
use std::collections::HashMap;
use std::sync::Arc;

/// Class-level declarations of one base type.
///
/// Specs are plain data: copyable, with a function pointer for
/// construction. One spec describes every instance of its base type,
/// across containers.
///
/// # Example
///
/// ```
/// use muster_base::Base;
/// use muster_runtime::{BaseContext, BaseSpec};
/// use std::any::Any;
/// use std::sync::Arc;
///
/// struct Radar;
///
/// impl Base for Radar {
///     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
///         self
///     }
/// }
///
/// const RADAR: BaseSpec = BaseSpec {
///     name: "radar",
///     dependencies: &["antenna"],
///     build: |_ctx: BaseContext| Ok(Arc::new(Radar)),
/// };
/// # let _ = RADAR;
/// ```
#[derive(Clone, Copy)]
pub struct BaseSpec {
    /// The name the base registers and resolves under.
    pub name: &'static str,

    /// Dependency names, loaded in declaration order.
    pub dependencies: &'static [&'static str],

    /// Constructs one instance for the container described by the
    /// context.
    pub build: fn(BaseContext) -> Result<Arc<dyn Base>, BaseError>,
}

impl std::fmt::Debug for BaseSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseSpec")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Resolves base names to specs during dependency loading.
pub trait BaseResolver: Send + Sync {
    /// Returns the spec registered under `name`, if any.
    ///
    /// A `None` here is fatal to the load that asked.
    fn resolve(&self, name: &str) -> Option<BaseSpec>;
}

/// In-memory resolver over a fixed set of registered specs.
///
/// Tests construct a fresh resolver per test for isolation; applications
/// typically build one at startup and share it across containers.
///
/// # Example
///
/// ```
/// # use muster_base::Base;
/// # use muster_runtime::{BaseResolver, BaseSpec, StaticBaseResolver};
/// # use std::any::Any;
/// # use std::sync::Arc;
/// # struct Radar;
/// # impl Base for Radar {
/// #     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> { self }
/// # }
/// # const RADAR: BaseSpec = BaseSpec {
/// #     name: "radar",
/// #     dependencies: &[],
/// #     build: |_| Ok(Arc::new(Radar)),
/// # };
/// let resolver = StaticBaseResolver::new().with(RADAR);
/// assert!(resolver.resolve("radar").is_some());
/// assert!(resolver.resolve("sonar").is_none());
/// ```
#[derive(Debug, Default)]
pub struct StaticBaseResolver {
    specs: HashMap<&'static str, BaseSpec>,
}

impl StaticBaseResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spec under its declared name.
    ///
    /// Registering a second spec under the same name replaces the
    /// first.
    pub fn register(&mut self, spec: BaseSpec) {
        self.specs.insert(spec.name, spec);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, spec: BaseSpec) -> Self {
        self.register(spec);
        self
    }

    /// Number of registered specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no specs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl BaseResolver for StaticBaseResolver {
    fn resolve(&self, name: &str) -> Option<BaseSpec> {
        self.specs.get(name).copied()
    }
}
