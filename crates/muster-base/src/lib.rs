//! Base component abstraction for the Muster composition runtime.
//!
//! A **Base** is the unit of composition: a component with a declared
//! list of dependency names, an optional configuration section, and
//! declarative signal-receiver and mountpoint registrations. Bases are
//! constructed by an HQ container during dependency resolution and live
//! exactly as long as their container.
//!
//! # Crate Architecture
//!
//! This crate is part of the **Component SDK** layer:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Component SDK Layer                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-types   : HqId, ReceiverId, SignalScope, ErrorCode  │
//! │  muster-signal  : Signal, Message, Receiver                 │
//! │  muster-mount   : Mountpoint, MountpointRegistry            │
//! │  muster-base    : Base trait, Wiring         ◄── HERE       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  muster-runtime : Hq, BaseSpec, dependency loading          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Declarative wiring
//!
//! A dynamic runtime would attach receivers with method decorators; here
//! the equivalent is a data-driven list, built once per instance by
//! [`Base::wiring`] and walked by the container at construction time:
//!
//! ```
//! use muster_base::{Base, Wiring};
//! use muster_signal::{Receiver, Signal};
//! use parking_lot::Mutex;
//! use serde::Deserialize;
//! use std::any::Any;
//! use std::sync::Arc;
//!
//! struct Ping;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct PingMessage { value: String }
//!
//! impl Signal for Ping {
//!     const NAME: &'static str = "ping";
//!     type Message = PingMessage;
//! }
//!
//! struct Tracker {
//!     pings: Mutex<Vec<String>>,
//! }
//!
//! impl Base for Tracker {
//!     fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
//!         self
//!     }
//!
//!     fn wiring(self: Arc<Self>) -> Wiring {
//!         let me = Arc::clone(&self);
//!         Wiring::new().respond::<Ping>(Receiver::from_fn(move |msg: PingMessage| {
//!             me.pings.lock().push(msg.value);
//!             Ok(())
//!         }))
//!     }
//! }
//! ```
//!
//! # Lifecycle contract
//!
//! [`Base::on_init`] runs exactly once, immediately after construction,
//! **before** the base's dependencies are necessarily loaded: in a
//! cyclic graph at least one member of every cycle is still
//! mid-construction when the others initialize. Dependency lookups are
//! safe only after the container's `load_dependencies` has returned.

mod base;
mod error;
mod wiring;

pub use base::Base;
pub use error::BaseError;
pub use wiring::Wiring;
