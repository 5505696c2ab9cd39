//! Declarative wiring: the data-driven equivalent of registration
//! decorators.
//!
//! A [`Wiring`] is a static list of signal bindings and mountpoint
//! contributions, produced once per base instance and walked by the
//! owning container at construction time. No reflection is involved:
//! each entry is a type-erased callable capturing the base's own `Arc`.

use muster_mount::{AnyContribution, Contribution, Mountpoint};
use muster_signal::{AnyReceiver, Receiver, Signal};

/// The declared signal receivers and mountpoint contributions of one
/// base instance.
///
/// Entries keep declaration order, which becomes connection and
/// registration order in the owning container.
///
/// # Example
///
/// ```
/// use muster_base::Wiring;
/// use muster_mount::Mountpoint;
/// use muster_signal::{Receiver, Signal};
/// use serde::Deserialize;
///
/// struct Saved;
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct SavedMessage { path: String }
///
/// impl Signal for Saved {
///     const NAME: &'static str = "saved";
///     type Message = SavedMessage;
/// }
///
/// struct Reporters;
///
/// impl Mountpoint for Reporters {
///     const NAME: &'static str = "reporters";
///     type Args = String;
/// }
///
/// let wiring = Wiring::new()
///     .respond::<Saved>(Receiver::from_fn(|_msg| Ok(())))
///     .mount::<Reporters>(|line| println!("{line}"));
///
/// assert_eq!(wiring.receivers().len(), 1);
/// assert_eq!(wiring.mounts().len(), 1);
/// ```
#[derive(Default)]
pub struct Wiring {
    receivers: Vec<AnyReceiver>,
    mounts: Vec<AnyContribution>,
}

impl Wiring {
    /// Creates an empty wiring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a receiver for signal `S`, scoped to the owning
    /// container at construction time.
    #[must_use]
    pub fn respond<S: Signal>(mut self, receiver: Receiver<S::Message>) -> Self {
        self.receivers.push(AnyReceiver::new::<S>(receiver));
        self
    }

    /// Declares a contribution to mountpoint `P`.
    #[must_use]
    pub fn mount<P: Mountpoint>(mut self, f: impl Fn(&P::Args) + Send + Sync + 'static) -> Self {
        self.mounts
            .push(AnyContribution::new::<P>(Contribution::new(f)));
        self
    }

    /// Declared signal receivers, in declaration order.
    #[must_use]
    pub fn receivers(&self) -> &[AnyReceiver] {
        &self.receivers
    }

    /// Declared mountpoint contributions, in declaration order.
    #[must_use]
    pub fn mounts(&self) -> &[AnyContribution] {
        &self.mounts
    }

    /// Consumes the wiring into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<AnyReceiver>, Vec<AnyContribution>) {
        (self.receivers, self.mounts)
    }
}
