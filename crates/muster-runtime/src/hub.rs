//! Process-wide signal dispatch hub.
//!
//! Connection tables are keyed by scope, then by signal type. The
//! [`SignalScope::Global`] table reaches every send; each HQ container
//! owns one [`SignalScope::Hq`] table that only sends addressed to that
//! container reach. Tables for a container are removed when it drops.
//!
//! Dispatch is fire-and-forget: one tokio task per receiver, scheduled
//! in connection order (Global connections first, then the addressed
//! container's). Receiver faults and panics are logged and isolated;
//! the sender only learns how many tasks were scheduled.

use futures::FutureExt;
use muster_signal::{AnyMessage, AnyReceiver, SignalError};
use muster_types::{HqId, ReceiverId, SignalScope};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

type SignalTable = HashMap<TypeId, Vec<(ReceiverId, AnyReceiver)>>;

static TABLES: Lazy<RwLock<HashMap<SignalScope, SignalTable>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Appends a receiver to its signal's list under `scope`.
///
/// Duplicate connections are kept; each registration fires once per
/// send.
pub(crate) fn connect(scope: SignalScope, receiver: AnyReceiver) -> ReceiverId {
    let id = ReceiverId::new();
    let mut tables = TABLES.write();
    let entries = tables
        .entry(scope)
        .or_default()
        .entry(receiver.signal_type())
        .or_default();
    tracing::debug!(
        signal = receiver.signal_name(),
        %scope,
        %id,
        position = entries.len(),
        "receiver connected"
    );
    entries.push((id, receiver));
    id
}

/// Removes the registration with the given id under `scope`.
///
/// Returns `false` when no such registration exists; disconnecting
/// twice is a no-op.
pub(crate) fn disconnect(scope: SignalScope, signal: TypeId, id: ReceiverId) -> bool {
    let mut tables = TABLES.write();
    let Some(entries) = tables.get_mut(&scope).and_then(|t| t.get_mut(&signal)) else {
        return false;
    };
    let Some(position) = entries.iter().position(|(rid, _)| *rid == id) else {
        return false;
    };
    let (_, receiver) = entries.remove(position);
    tracing::debug!(
        signal = receiver.signal_name(),
        %scope,
        %id,
        "receiver disconnected"
    );
    true
}

/// Schedules one task per reachable receiver and returns the count.
///
/// Reachability follows [`SignalScope::reached_by`]: Global receivers
/// are scheduled first, then those under `Hq(target)` when a target is
/// given, each list in connection order. Nothing is awaited here; a
/// receiver fault or panic is reported from its own task and isolated.
///
/// # Errors
///
/// Returns [`SignalError::NoRuntime`] when called outside a tokio
/// runtime; no receiver is scheduled in that case.
pub(crate) fn schedule(
    signal: TypeId,
    target: Option<HqId>,
    message: AnyMessage,
) -> Result<usize, SignalError> {
    let handle = tokio::runtime::Handle::try_current().map_err(|_| SignalError::NoRuntime)?;

    let resolved = target.map_or(SignalScope::Global, SignalScope::Hq);
    let receivers: Vec<AnyReceiver> = {
        let tables = TABLES.read();
        let mut reached: Vec<(&SignalScope, &SignalTable)> = tables
            .iter()
            .filter(|(scope, _)| scope.reached_by(resolved))
            .collect();
        // Global connections fire before container-scoped ones.
        reached.sort_by_key(|(scope, _)| !scope.is_global());
        reached
            .iter()
            .filter_map(|(_, table)| table.get(&signal))
            .flatten()
            .map(|(_, r)| r.clone())
            .collect()
    };

    for receiver in &receivers {
        let name = receiver.signal_name();
        let invocation = receiver.invoke(AnyMessage::clone(&message));
        handle.spawn(async move {
            match AssertUnwindSafe(invocation).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(fault)) => {
                    tracing::error!(signal = name, %fault, "receiver fault isolated");
                }
                Err(panic) => {
                    let reason = panic
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "opaque panic payload".to_string());
                    tracing::error!(signal = name, reason, "receiver panic isolated");
                }
            }
        });
    }

    Ok(receivers.len())
}

/// Number of receivers currently connected for `signal` under `scope`.
pub(crate) fn connected(scope: SignalScope, signal: TypeId) -> usize {
    TABLES
        .read()
        .get(&scope)
        .and_then(|t| t.get(&signal))
        .map_or(0, Vec::len)
}

/// Drops every table belonging to a container.
///
/// Called from the container's `Drop`; its receivers become
/// unreachable even if a send with its id is already in flight behind
/// the table lock.
pub(crate) fn drop_scope(id: HqId) {
    let removed = TABLES.write().remove(&SignalScope::Hq(id));
    if let Some(table) = removed {
        let receivers: usize = table.values().map(Vec::len).sum();
        tracing::debug!(hq = %id, receivers, "scope tables dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use muster_signal::{Receiver, Signal};
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // Tables are process-wide, so each test uses its own signal type.

    #[derive(Debug, Clone, Deserialize)]
    struct Msg {
        #[allow(dead_code)]
        n: u32,
    }

    macro_rules! test_signal {
        ($name:ident) => {
            struct $name;

            impl Signal for $name {
                const NAME: &'static str = stringify!($name);
                type Message = Msg;
            }
        };
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    fn counting_receiver(hits: &Arc<AtomicUsize>) -> Receiver<Msg> {
        let probe = Arc::clone(hits);
        Receiver::from_fn(move |_| {
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    test_signal!(HubProbe);

    #[tokio::test]
    async fn schedule_reaches_global_and_target_scope() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hq = HqId::new();
        let other = HqId::new();

        connect(
            SignalScope::Global,
            AnyReceiver::new::<HubProbe>(counting_receiver(&hits)),
        );
        connect(
            SignalScope::Hq(hq),
            AnyReceiver::new::<HubProbe>(counting_receiver(&hits)),
        );
        connect(
            SignalScope::Hq(other),
            AnyReceiver::new::<HubProbe>(counting_receiver(&hits)),
        );

        let msg: AnyMessage = Arc::new(Msg { n: 1 });
        let scheduled = schedule(TypeId::of::<HubProbe>(), Some(hq), msg).unwrap();
        settle().await;

        // Global + this hq, not the other container's receiver.
        assert_eq!(scheduled, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    test_signal!(DisconnectProbe);

    #[tokio::test]
    async fn disconnect_removes_exactly_one() {
        let hits = Arc::new(AtomicUsize::new(0));

        let first = connect(
            SignalScope::Global,
            AnyReceiver::new::<DisconnectProbe>(counting_receiver(&hits)),
        );
        connect(
            SignalScope::Global,
            AnyReceiver::new::<DisconnectProbe>(counting_receiver(&hits)),
        );

        assert!(disconnect(
            SignalScope::Global,
            TypeId::of::<DisconnectProbe>(),
            first
        ));
        // Second disconnect of the same id is a no-op.
        assert!(!disconnect(
            SignalScope::Global,
            TypeId::of::<DisconnectProbe>(),
            first
        ));

        let msg: AnyMessage = Arc::new(Msg { n: 2 });
        let scheduled = schedule(TypeId::of::<DisconnectProbe>(), None, msg).unwrap();
        settle().await;

        assert_eq!(scheduled, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    test_signal!(FaultProbe);

    #[tokio::test]
    async fn faults_do_not_reach_siblings() {
        use muster_signal::ReceiverFault;

        let hits = Arc::new(AtomicUsize::new(0));

        connect(
            SignalScope::Global,
            AnyReceiver::new::<FaultProbe>(Receiver::from_fn(|_| {
                Err(ReceiverFault::new("deliberate"))
            })),
        );
        connect(
            SignalScope::Global,
            AnyReceiver::new::<FaultProbe>(counting_receiver(&hits)),
        );

        let msg: AnyMessage = Arc::new(Msg { n: 3 });
        let scheduled = schedule(TypeId::of::<FaultProbe>(), None, msg).unwrap();
        settle().await;

        assert_eq!(scheduled, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    test_signal!(PanicProbe);

    #[tokio::test]
    async fn panics_are_contained_per_receiver() {
        let hits = Arc::new(AtomicUsize::new(0));

        connect(
            SignalScope::Global,
            AnyReceiver::new::<PanicProbe>(Receiver::from_fn(|_| panic!("deliberate"))),
        );
        connect(
            SignalScope::Global,
            AnyReceiver::new::<PanicProbe>(counting_receiver(&hits)),
        );

        let msg: AnyMessage = Arc::new(Msg { n: 5 });
        let scheduled = schedule(TypeId::of::<PanicProbe>(), None, msg).unwrap();
        settle().await;

        assert_eq!(scheduled, 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    test_signal!(DropProbe);

    #[tokio::test]
    async fn dropped_scope_is_unreachable() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hq = HqId::new();

        connect(
            SignalScope::Hq(hq),
            AnyReceiver::new::<DropProbe>(counting_receiver(&hits)),
        );
        assert_eq!(connected(SignalScope::Hq(hq), TypeId::of::<DropProbe>()), 1);

        drop_scope(hq);
        assert_eq!(connected(SignalScope::Hq(hq), TypeId::of::<DropProbe>()), 0);

        let msg: AnyMessage = Arc::new(Msg { n: 4 });
        let scheduled = schedule(TypeId::of::<DropProbe>(), Some(hq), msg).unwrap();
        settle().await;

        assert_eq!(scheduled, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
