//! Signal types for the Muster composition runtime.
//!
//! A [`Signal`] is a typed event channel: the signal type names the
//! channel, and its associated [`Signal::Message`] defines the payload
//! schema. Bases and application code connect [`Receiver`]s to a signal
//! and broadcast messages to every receiver currently connected, without
//! waiting for any of them to finish.
//!
//! # Signal Flow
//!
//! ```text
//! ┌─────────────┐  send(msg)   ┌─────────────┐  spawn   ┌───────────┐
//! │   Sender    │ ───────────► │  Dispatch   │ ───────► │ Receiver  │
//! │  (any code) │              │  hub (HQ)   │ ───────► │ Receiver  │
//! └─────────────┘              └─────────────┘          └───────────┘
//! ```
//!
//! The sender is decoupled from receiver completion and receiver
//! failure: each receiver invocation is an independent unit of work, and
//! a failing receiver is reported and isolated, never propagated back.
//!
//! This crate defines the *types* only; the dispatch hub that owns the
//! connection tables lives in `muster-runtime`, next to the HQ container
//! that scopes them.
//!
//! # Defining a signal
//!
//! ```
//! use muster_signal::Signal;
//! use serde::Deserialize;
//!
//! struct UserJoined;
//!
//! #[derive(Debug, Clone, Deserialize, PartialEq)]
//! #[serde(deny_unknown_fields)]
//! struct UserJoinedMessage {
//!     name: String,
//!     #[serde(default)]
//!     quiet: bool,
//! }
//!
//! impl Signal for UserJoined {
//!     const NAME: &'static str = "user_joined";
//!     type Message = UserJoinedMessage;
//! }
//! ```
//!
//! `#[serde(deny_unknown_fields)]` plus `#[serde(default)]` give the
//! schema contract for the dynamic send path: unknown fields and missing
//! required fields are rejected before any receiver is scheduled.

mod error;
mod receiver;
mod signal;

pub use error::SignalError;
pub use receiver::{AnyMessage, AnyReceiver, Receiver, ReceiverFault, ReceiverFuture};
pub use signal::{Message, Signal};
