//! Mountpoint registry — per-container contribution tables.
//!
//! One registry is owned by each HQ container. Registration happens
//! synchronously while a base is constructed; reads take an ordered
//! snapshot, so iteration never observes mid-iteration mutation.

use crate::point::{AnyContribution, Contribution, Mountpoint};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;

/// Ordered contribution tables, one per mountpoint type.
///
/// # Semantics
///
/// - Contribution order is registration order.
/// - Duplicates are kept: registering the same callable twice means it
///   appears (and is invoked) twice.
/// - There is no removal operation; contributions live as long as the
///   registry's owning container.
///
/// # Concurrency
///
/// Interior `RwLock`: `register()` takes a write lock, reads take a
/// read lock and return snapshots. Contributions registered after a
/// snapshot was taken are visible to the next read, not to the
/// snapshot already handed out.
pub struct MountpointRegistry {
    tables: RwLock<HashMap<TypeId, Table>>,
}

struct Table {
    point_name: &'static str,
    entries: Vec<AnyContribution>,
}

impl MountpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a type-erased contribution to its mountpoint's table.
    pub fn register(&self, contribution: AnyContribution) {
        let mut tables = self.tables.write();
        let table = tables
            .entry(contribution.point_type())
            .or_insert_with(|| Table {
                point_name: contribution.point_name(),
                entries: Vec::new(),
            });
        tracing::debug!(
            point = contribution.point_name(),
            position = table.entries.len(),
            "mountpoint contribution registered"
        );
        table.entries.push(contribution);
    }

    /// Convenience: registers a typed callable for mountpoint `P`.
    pub fn register_for<P: Mountpoint>(&self, f: impl Fn(&P::Args) + Send + Sync + 'static) {
        self.register(AnyContribution::new::<P>(Contribution::new(f)));
    }

    /// Returns the current ordered contributions for mountpoint `P`.
    ///
    /// An empty vector means no base has contributed to `P` in this
    /// container (or `P` was never mounted at all; use
    /// [`contains`](Self::contains) to tell the two apart).
    #[must_use]
    pub fn mounted<P: Mountpoint>(&self) -> Vec<Contribution<P>> {
        let tables = self.tables.read();
        let Some(table) = tables.get(&TypeId::of::<P>()) else {
            return Vec::new();
        };

        table
            .entries
            .iter()
            .filter_map(|entry| {
                let typed = entry.downcast::<P>();
                if typed.is_none() {
                    // Keyed by TypeId, so this means a mis-filed entry.
                    tracing::warn!(
                        point = table.point_name,
                        "mountpoint entry with mismatched type skipped"
                    );
                }
                typed
            })
            .collect()
    }

    /// Returns `true` if mountpoint `P` has a table in this registry.
    #[must_use]
    pub fn contains<P: Mountpoint>(&self) -> bool {
        self.tables.read().contains_key(&TypeId::of::<P>())
    }

    /// Number of contributions registered for mountpoint `P`.
    #[must_use]
    pub fn count<P: Mountpoint>(&self) -> usize {
        self.tables
            .read()
            .get(&TypeId::of::<P>())
            .map_or(0, |t| t.entries.len())
    }

    /// Total number of contributions across all mountpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().values().map(|t| t.entries.len()).sum()
    }

    /// Returns `true` if no contributions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MountpointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Things;

    impl Mountpoint for Things {
        const NAME: &'static str = "things";
        type Args = String;
    }

    struct Unused;

    impl Mountpoint for Unused {
        const NAME: &'static str = "unused";
        type Args = ();
    }

    // ── Registration order ───────────────────────────────────

    #[test]
    fn contributions_keep_registration_order() {
        let registry = MountpointRegistry::new();
        let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        registry.register_for::<Things>(move |_| first.lock().push("first"));
        let second = Arc::clone(&log);
        registry.register_for::<Things>(move |_| second.lock().push("second"));

        for c in registry.mounted::<Things>() {
            c.call(&String::new());
        }

        assert_eq!(*log.lock(), vec!["first", "second"]);
    }

    #[test]
    fn duplicate_registration_is_kept() {
        let registry = MountpointRegistry::new();
        let c = Contribution::<Things>::new(|_| {});

        registry.register(AnyContribution::new::<Things>(c.clone()));
        registry.register(AnyContribution::new::<Things>(c));

        assert_eq!(registry.count::<Things>(), 2);
    }

    // ── Lookup ───────────────────────────────────────────────

    #[test]
    fn unmounted_point_is_absent() {
        let registry = MountpointRegistry::new();
        assert!(!registry.contains::<Unused>());
        assert!(registry.mounted::<Unused>().is_empty());
        assert_eq!(registry.count::<Unused>(), 0);
    }

    #[test]
    fn points_do_not_share_tables() {
        let registry = MountpointRegistry::new();
        registry.register_for::<Things>(|_| {});

        assert!(registry.contains::<Things>());
        assert!(!registry.contains::<Unused>());
        assert_eq!(registry.len(), 1);
    }

    // ── Live view ────────────────────────────────────────────

    #[test]
    fn snapshot_is_stable_while_registry_grows() {
        let registry = MountpointRegistry::new();
        registry.register_for::<Things>(|_| {});

        let snapshot = registry.mounted::<Things>();
        registry.register_for::<Things>(|_| {});

        // The old snapshot is unchanged; a fresh read sees both.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.mounted::<Things>().len(), 2);
    }

    #[test]
    fn empty_registry() {
        let registry = MountpointRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
