//! Receiver callables and their type-erased form.
//!
//! A [`Receiver`] wraps a callable accepting one message. Synchronous
//! closures and async closures are both supported and dispatch
//! identically: the hub spawns one independent task per invocation, so a
//! slow or failing receiver cannot block its siblings or the sender.
//!
//! [`AnyReceiver`] is the type-erased form used by connection tables and
//! by declarative base wiring, where receivers for many different signal
//! types live in one list.

use crate::signal::{Message, Signal};
use futures::future::BoxFuture;
use std::any::{Any, TypeId};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// A type-erased message payload travelling through the dispatch hub.
pub type AnyMessage = Arc<dyn Any + Send + Sync>;

/// The unit of work produced by one receiver invocation.
pub type ReceiverFuture = BoxFuture<'static, Result<(), ReceiverFault>>;

/// Failure reported by a receiver invocation.
///
/// Faults are isolated at the dispatch boundary: they are logged and do
/// not affect sibling receivers or the sender.
#[derive(Debug, Clone, Error)]
#[error("receiver fault: {0}")]
pub struct ReceiverFault(String);

impl ReceiverFault {
    /// Creates a fault with the given description.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Returns the fault description.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// A callable accepting one message of type `M`.
///
/// Cloning a `Receiver` clones the handle, not the callable; both clones
/// invoke the same underlying function.
///
/// # Example
///
/// ```
/// use muster_signal::{Receiver, ReceiverFault};
///
/// // Synchronous receiver
/// let sync = Receiver::<u32>::from_fn(|n| {
///     assert!(n > 0);
///     Ok(())
/// });
///
/// // Async receiver
/// let asynchronous = Receiver::<u32>::from_async(|n| async move {
///     if n == 0 {
///         return Err(ReceiverFault::new("zero"));
///     }
///     Ok(())
/// });
/// # let _ = (sync, asynchronous);
/// ```
pub struct Receiver<M> {
    f: Arc<dyn Fn(M) -> ReceiverFuture + Send + Sync>,
}

impl<M> Clone for Receiver<M> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<M: Send + 'static> Receiver<M> {
    /// Wraps a synchronous closure.
    ///
    /// The closure runs inside the spawned invocation task, so a slow
    /// synchronous receiver still cannot block the sender.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(M) -> Result<(), ReceiverFault> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self {
            f: Arc::new(move |msg| {
                let f = Arc::clone(&f);
                Box::pin(async move { f(msg) })
            }),
        }
    }

    /// Wraps an async closure.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ReceiverFault>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |msg| Box::pin(f(msg))),
        }
    }

    /// Produces the invocation future for one message.
    pub fn invoke(&self, msg: M) -> ReceiverFuture {
        (self.f)(msg)
    }
}

/// A type-erased receiver bound to a specific signal type.
///
/// Connection tables and base wiring store `AnyReceiver`s; the dispatch
/// hub downcasts the erased message back to the concrete type at
/// invocation time. The downcast cannot fail in practice because tables
/// are keyed by the signal's `TypeId`, but a mismatch surfaces as a
/// [`ReceiverFault`] rather than a panic.
#[derive(Clone)]
pub struct AnyReceiver {
    signal: TypeId,
    signal_name: &'static str,
    f: Arc<dyn Fn(AnyMessage) -> ReceiverFuture + Send + Sync>,
}

impl AnyReceiver {
    /// Erases a typed receiver for signal `S`.
    pub fn new<S: Signal>(receiver: Receiver<S::Message>) -> Self {
        Self {
            signal: TypeId::of::<S>(),
            signal_name: S::NAME,
            f: Arc::new(move |msg: AnyMessage| match msg.downcast::<S::Message>() {
                Ok(m) => receiver.invoke((*m).clone()),
                Err(_) => {
                    let name = S::NAME;
                    Box::pin(async move {
                        Err(ReceiverFault::new(format!(
                            "message type mismatch for signal '{name}'"
                        )))
                    })
                }
            }),
        }
    }

    /// The `TypeId` of the signal this receiver is bound to.
    #[must_use]
    pub fn signal_type(&self) -> TypeId {
        self.signal
    }

    /// The name of the signal this receiver is bound to.
    #[must_use]
    pub fn signal_name(&self) -> &'static str {
        self.signal_name
    }

    /// Produces the invocation future for one erased message.
    pub fn invoke(&self, msg: AnyMessage) -> ReceiverFuture {
        (self.f)(msg)
    }
}

impl std::fmt::Debug for AnyReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyReceiver")
            .field("signal", &self.signal_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Ping;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct PingMessage {
        zoom: u32,
    }

    impl Signal for Ping {
        const NAME: &'static str = "ping";
        type Message = PingMessage;
    }

    #[tokio::test]
    async fn sync_receiver_invokes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);

        let receiver = Receiver::<PingMessage>::from_fn(move |msg| {
            assert_eq!(msg.zoom, 5);
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        receiver.invoke(PingMessage { zoom: 5 }).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn async_receiver_invokes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);

        let receiver = Receiver::<PingMessage>::from_async(move |msg| {
            let probe = Arc::clone(&probe);
            async move {
                assert_eq!(msg.zoom, 7);
                probe.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        receiver.invoke(PingMessage { zoom: 7 }).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn receiver_fault_carries_reason() {
        let receiver =
            Receiver::<PingMessage>::from_fn(|_| Err(ReceiverFault::new("deliberate")));

        let err = receiver.invoke(PingMessage { zoom: 0 }).await.unwrap_err();
        assert_eq!(err.reason(), "deliberate");
    }

    #[tokio::test]
    async fn erased_receiver_downcasts_message() {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);

        let typed = Receiver::<PingMessage>::from_fn(move |msg| {
            assert_eq!(msg.zoom, 3);
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let erased = AnyReceiver::new::<Ping>(typed);

        assert_eq!(erased.signal_type(), TypeId::of::<Ping>());
        assert_eq!(erased.signal_name(), "ping");

        let msg: AnyMessage = Arc::new(PingMessage { zoom: 3 });
        erased.invoke(msg).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn erased_receiver_rejects_wrong_message_type() {
        let typed = Receiver::<PingMessage>::from_fn(|_| Ok(()));
        let erased = AnyReceiver::new::<Ping>(typed);

        let wrong: AnyMessage = Arc::new(42u64);
        let err = erased.invoke(wrong).await.unwrap_err();
        assert!(err.reason().contains("ping"));
    }

    #[tokio::test]
    async fn cloned_receiver_shares_callable() {
        let hits = Arc::new(AtomicUsize::new(0));
        let probe = Arc::clone(&hits);

        let receiver = Receiver::<PingMessage>::from_fn(move |_| {
            probe.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let clone = receiver.clone();

        receiver.invoke(PingMessage { zoom: 1 }).await.unwrap();
        clone.invoke(PingMessage { zoom: 2 }).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
