//! Per-base construction context.

use crate::config::MusterConfig;
use crate::hq::{Hq, HqInner};
use muster_base::{Base, BaseError};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Weak};

/// What a base knows about its place in the container.
///
/// Handed to `BaseSpec::build` and typically stored by the base. The
/// container handle inside is weak: a base never keeps its own HQ
/// alive.
///
/// Dependency lookups resolve against the container's **live** registry
/// at call time. During construction of a cycle, a dependency that is
/// still mid-construction is simply absent; it appears once the
/// surrounding `load_dependencies` call has inserted it.
#[derive(Clone)]
pub struct BaseContext {
    hq: Weak<HqInner>,
    name: String,
    dependencies: Vec<String>,
    config: MusterConfig,
}

impl BaseContext {
    pub(crate) fn new(
        hq: Weak<HqInner>,
        name: &str,
        dependencies: &[&str],
        config: MusterConfig,
    ) -> Self {
        Self {
            hq,
            name: name.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            config,
        }
    }

    /// The name this base was resolved and registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared dependency names, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// A handle to the owning container.
    ///
    /// # Errors
    ///
    /// [`BaseError::ContainerGone`] when the container has been dropped.
    pub fn hq(&self) -> Result<Hq, BaseError> {
        self.hq
            .upgrade()
            .map(Hq::from_inner)
            .ok_or(BaseError::ContainerGone)
    }

    /// The currently loaded dependencies, in declaration order.
    ///
    /// Resolved against the live registry on every call; names still
    /// mid-construction (or never loaded) are skipped.
    #[must_use]
    pub fn bases(&self) -> Vec<(String, Arc<dyn Base>)> {
        let Ok(hq) = self.hq() else {
            return Vec::new();
        };
        self.dependencies
            .iter()
            .filter_map(|name| hq.base(name).map(|base| (name.clone(), base)))
            .collect()
    }

    /// Looks up one declared dependency by name.
    ///
    /// `None` when the container is gone, the name was not declared, or
    /// the dependency is not loaded yet.
    #[must_use]
    pub fn dependency(&self, name: &str) -> Option<Arc<dyn Base>> {
        if !self.dependencies.iter().any(|d| d == name) {
            return None;
        }
        self.hq().ok()?.base(name)
    }

    /// Typed [`dependency`](Self::dependency) lookup.
    #[must_use]
    pub fn dependency_as<T: Base>(&self, name: &str) -> Option<Arc<T>> {
        self.dependency(name)?.as_any().downcast::<T>().ok()
    }

    /// The HQ-wide configuration.
    #[must_use]
    pub fn config(&self) -> &MusterConfig {
        &self.config
    }

    /// Deserializes this base's own configuration section.
    ///
    /// # Errors
    ///
    /// [`BaseError::Config`] when the section does not match `T`.
    pub fn config_for<T: DeserializeOwned>(&self) -> Result<T, BaseError> {
        self.config
            .for_base(&self.name)
            .map_err(|e| BaseError::Config(e.to_string()))
    }
}

impl std::fmt::Debug for BaseContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseContext")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .field("container_alive", &(self.hq.strong_count() > 0))
            .finish_non_exhaustive()
    }
}
