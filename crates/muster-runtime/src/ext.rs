//! Signal operations as an extension trait.
//!
//! [`SignalExt`] is blanket-implemented for every [`Signal`] type, so
//! call sites read `Ping::send(..)` rather than going through a bus
//! object. `using` addresses a specific container; `None` falls back to
//! the ambient current HQ where one applies.

use crate::hq::Hq;
use crate::hub;
use muster_signal::{AnyReceiver, Receiver, Signal, SignalError};
use muster_types::{ReceiverId, SignalScope};
use std::any::TypeId;
use std::sync::Arc;

fn registration_scope(using: Option<&Hq>) -> SignalScope {
    using.map_or(SignalScope::Global, Hq::scope)
}

/// Connect, disconnect, and send operations for a signal type.
///
/// # Example
///
/// ```
/// use muster_runtime::SignalExt;
/// use muster_signal::{Receiver, Signal};
/// use serde::Deserialize;
///
/// struct Saved;
///
/// #[derive(Debug, Clone, Deserialize)]
/// #[serde(deny_unknown_fields)]
/// struct SavedMessage {
///     path: String,
/// }
///
/// impl Signal for Saved {
///     const NAME: &'static str = "saved";
///     type Message = SavedMessage;
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let id = Saved::connect(
///     Receiver::from_fn(|msg: SavedMessage| {
///         println!("saved to {}", msg.path);
///         Ok(())
///     }),
///     None,
/// );
///
/// let scheduled = Saved::send(SavedMessage { path: "/tmp/x".into() }, None).unwrap();
/// assert_eq!(scheduled, 1);
///
/// assert!(Saved::disconnect(id, None));
/// # }
/// ```
pub trait SignalExt: Signal + Sized {
    /// Registers a receiver and returns its disconnection token.
    ///
    /// `using: Some(hq)` scopes the registration to that container (it
    /// fires only for sends resolved there, and dies with the
    /// container); `None` registers process-wide. Connecting the same
    /// callable twice registers it twice, and it fires twice per send.
    fn connect(receiver: Receiver<Self::Message>, using: Option<&Hq>) -> ReceiverId {
        hub::connect(registration_scope(using), AnyReceiver::new::<Self>(receiver))
    }

    /// Removes the registration made under the same `using` scope.
    ///
    /// Returns `false` when the token is not registered there; a second
    /// disconnect of the same token is a no-op.
    fn disconnect(id: ReceiverId, using: Option<&Hq>) -> bool {
        hub::disconnect(registration_scope(using), TypeId::of::<Self>(), id)
    }

    /// Fire-and-forget send of a typed message.
    ///
    /// Schedules one task per reachable receiver (process-wide ones
    /// first, then the resolved container's, each in connection order)
    /// and returns the scheduled count without awaiting anything.
    /// `using: None` resolves to the ambient current HQ when one is
    /// set, otherwise the send reaches process-wide receivers only.
    ///
    /// # Errors
    ///
    /// [`SignalError::NoRuntime`] outside a tokio runtime.
    fn send(message: Self::Message, using: Option<&Hq>) -> Result<usize, SignalError> {
        let target = using.map(Hq::id).or_else(|| Hq::current().map(|hq| hq.id()));
        hub::schedule(TypeId::of::<Self>(), target, Arc::new(message))
    }

    /// [`send`](Self::send) from an untyped JSON value.
    ///
    /// The value is checked against the message schema first; a
    /// mismatch fails the whole send before any receiver is scheduled,
    /// so there is no partial dispatch. Message types that opt into
    /// `#[serde(deny_unknown_fields)]` also reject extra fields here.
    ///
    /// # Errors
    ///
    /// [`SignalError::Schema`] on a value that does not match the
    /// message type, [`SignalError::NoRuntime`] outside a tokio
    /// runtime.
    fn send_value(value: serde_json::Value, using: Option<&Hq>) -> Result<usize, SignalError> {
        let message: Self::Message =
            serde_json::from_value(value).map_err(|e| SignalError::Schema(e.to_string()))?;
        Self::send(message, using)
    }
}

impl<S: Signal> SignalExt for S {}
