//! Scope types for signal registration and dispatch boundaries.

use crate::HqId;
use serde::{Deserialize, Serialize};

/// The scope a signal receiver is registered under.
///
/// A receiver connected under [`Global`](SignalScope::Global) fires for
/// every send of its signal type. A receiver connected under
/// [`Hq`](SignalScope::Hq) fires only for sends resolved to that same
/// container (every send also fans out to Global receivers).
///
/// # Scope resolution at send time
///
/// ```text
/// send(using = Some(hq))  → Global + Hq(hq.id())
/// send(using = None)      → Global + Hq(current) if a current HQ is set
///                           Global only otherwise
/// ```
///
/// # Example
///
/// ```
/// use muster_types::{HqId, SignalScope};
///
/// let global = SignalScope::Global;
/// let scoped = SignalScope::Hq(HqId::new());
///
/// assert!(global.is_global());
/// assert!(!scoped.is_global());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalScope {
    /// Process-wide: fires for every send of the signal type.
    Global,

    /// Scoped to a single HQ container.
    Hq(HqId),
}

impl SignalScope {
    /// Returns `true` if this is the process-wide scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }

    /// Returns the target container if this is an HQ scope.
    ///
    /// # Example
    ///
    /// ```
    /// use muster_types::{HqId, SignalScope};
    ///
    /// let id = HqId::new();
    /// assert_eq!(SignalScope::Hq(id).hq(), Some(id));
    /// assert_eq!(SignalScope::Global.hq(), None);
    /// ```
    #[must_use]
    pub fn hq(&self) -> Option<HqId> {
        match self {
            Self::Global => None,
            Self::Hq(id) => Some(*id),
        }
    }

    /// Returns `true` if a send resolved to `scope` reaches receivers
    /// registered under `self`.
    ///
    /// Global registrations are reached by every send; HQ registrations
    /// only by sends resolved to the same container.
    #[must_use]
    pub fn reached_by(&self, scope: SignalScope) -> bool {
        match self {
            Self::Global => true,
            Self::Hq(id) => scope == Self::Hq(*id),
        }
    }
}

impl std::fmt::Display for SignalScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "scope:global"),
            Self::Hq(id) => write!(f, "scope:hq:{}", id.uuid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope() {
        let scope = SignalScope::Global;
        assert!(scope.is_global());
        assert!(scope.hq().is_none());
    }

    #[test]
    fn hq_scope() {
        let id = HqId::new();
        let scope = SignalScope::Hq(id);
        assert!(!scope.is_global());
        assert_eq!(scope.hq(), Some(id));
    }

    #[test]
    fn global_reached_by_any_send() {
        let hq = HqId::new();
        assert!(SignalScope::Global.reached_by(SignalScope::Global));
        assert!(SignalScope::Global.reached_by(SignalScope::Hq(hq)));
    }

    #[test]
    fn hq_reached_only_by_same_hq() {
        let a = HqId::new();
        let b = HqId::new();
        let scope = SignalScope::Hq(a);

        assert!(scope.reached_by(SignalScope::Hq(a)));
        assert!(!scope.reached_by(SignalScope::Hq(b)));
        assert!(!scope.reached_by(SignalScope::Global));
    }

    #[test]
    fn equality() {
        let a = HqId::new();
        let b = HqId::new();

        assert_eq!(SignalScope::Global, SignalScope::Global);
        assert_eq!(SignalScope::Hq(a), SignalScope::Hq(a));
        assert_ne!(SignalScope::Hq(a), SignalScope::Hq(b));
        assert_ne!(SignalScope::Global, SignalScope::Hq(a));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", SignalScope::Global), "scope:global");
        let id = HqId::new();
        assert!(format!("{}", SignalScope::Hq(id)).starts_with("scope:hq:"));
    }
}
